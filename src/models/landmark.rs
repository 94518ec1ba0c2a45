/// Landmark models and data structures
///
/// This module provides the body-landmark representation produced by the
/// external pose estimator: 33 landmarks per detected body in normalised
/// image coordinates, grouped into bodies and time-stamped frames.

use serde::{Deserialize, Serialize};

/// Number of landmarks per detected body
pub const LANDMARK_COUNT: usize = 33;

/// A single body landmark
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate, normalised to frame width (0-1)
    pub x: f64,
    /// Y coordinate, normalised to frame height (0-1, grows downward)
    pub y: f64,
    /// Relative depth, unitless
    #[serde(default)]
    pub z: f64,
    /// Detection confidence (0-1)
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Create a new landmark with zero depth
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    /// Check if the landmark is confident enough to take part in a computation
    pub fn is_visible(&self, min_visibility: f64) -> bool {
        self.visibility >= min_visibility
    }

    /// Euclidean distance to another landmark in the image plane
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Sum of absolute x and y displacement to another landmark
    pub fn manhattan_2d(&self, other: &Landmark) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Anatomical landmark indices of the 33-point body model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    const ALL: [PoseLandmark; LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Position of this landmark in a body's landmark array
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a landmark up by array position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Get all landmarks in index order
    pub fn all() -> &'static [PoseLandmark] {
        &Self::ALL
    }

    /// Get landmark name
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Coarse body region, used to group pose deviations
    pub fn group(self) -> BodyGroup {
        match self {
            Self::LeftElbow
            | Self::RightElbow
            | Self::LeftWrist
            | Self::RightWrist
            | Self::LeftPinky
            | Self::RightPinky
            | Self::LeftIndex
            | Self::RightIndex
            | Self::LeftThumb
            | Self::RightThumb => BodyGroup::Arm,
            Self::LeftShoulder | Self::RightShoulder | Self::LeftHip | Self::RightHip => {
                BodyGroup::Torso
            }
            Self::LeftKnee
            | Self::RightKnee
            | Self::LeftAnkle
            | Self::RightAnkle
            | Self::LeftHeel
            | Self::RightHeel
            | Self::LeftFootIndex
            | Self::RightFootIndex => BodyGroup::Leg,
            _ => BodyGroup::Head,
        }
    }
}

/// Landmarks that take part in a stroke: shoulders, elbows, wrists, hips,
/// knees and ankles
pub const STROKE_LANDMARKS: [PoseLandmark; 12] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftElbow,
    PoseLandmark::RightElbow,
    PoseLandmark::LeftWrist,
    PoseLandmark::RightWrist,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
    PoseLandmark::LeftKnee,
    PoseLandmark::RightKnee,
    PoseLandmark::LeftAnkle,
    PoseLandmark::RightAnkle,
];

/// Body region of a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyGroup {
    Head,
    Arm,
    Torso,
    Leg,
}

/// Body side, used for handedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Wrist landmark on this side
    pub fn wrist(self) -> PoseLandmark {
        match self {
            Side::Left => PoseLandmark::LeftWrist,
            Side::Right => PoseLandmark::RightWrist,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// One detected body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Landmarks in [`PoseLandmark`] index order; normally 33 entries
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl Body {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Get landmark by anatomical index
    pub fn landmark(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.landmarks.get(landmark.index())
    }
}

/// Pose estimator output for one video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(alias = "timestampSeconds")]
    pub timestamp_seconds: f64,
    /// Detected bodies; empty when nobody was detected
    #[serde(default, alias = "poses")]
    pub bodies: Vec<Body>,
}

impl Frame {
    pub fn new(timestamp_seconds: f64, bodies: Vec<Body>) -> Self {
        Self {
            timestamp_seconds,
            bodies,
        }
    }
}

/// One body's landmarks at one point in time, borrowed from a [`Frame`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFrame<'a> {
    pub timestamp_seconds: f64,
    pub landmarks: &'a [Landmark],
}

impl<'a> PlayerFrame<'a> {
    pub fn landmark(&self, landmark: PoseLandmark) -> Option<&'a Landmark> {
        self.landmarks.get(landmark.index())
    }

    /// Landmark if present and at least `min_visibility` confident
    pub fn visible_landmark(
        &self,
        landmark: PoseLandmark,
        min_visibility: f64,
    ) -> Option<&'a Landmark> {
        self.landmark(landmark)
            .filter(|lm| lm.is_visible(min_visibility))
    }
}
