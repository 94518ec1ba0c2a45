/// Keypoint Processing Service
///
/// Shared landmark plumbing for the analysis pipelines:
/// - Single-body extraction from multi-body frames
/// - Dominant-side inference from wrist activity
/// - Centered moving-average smoothing and trough detection
/// - Torso-relative normalisation (shoulder/hip centre and length)

use crate::models::{Frame, Landmark, PlayerFrame, PoseLandmark, Side};

/// Keypoint processor service
#[derive(Debug, Clone)]
pub struct KeypointProcessor {
    /// Minimum visibility for a landmark to take part in a computation
    min_visibility: f64,
}

impl KeypointProcessor {
    /// Create a new keypoint processor with the default visibility floor
    pub fn new() -> Self {
        Self {
            min_visibility: 0.3,
        }
    }

    /// Set minimum visibility threshold
    pub fn with_min_visibility(mut self, min_visibility: f64) -> Self {
        self.min_visibility = min_visibility.clamp(0.0, 1.0);
        self
    }

    pub fn min_visibility(&self) -> f64 {
        self.min_visibility
    }

    /// Keep one body per frame, dropping frames where that body is absent
    pub fn extract_player_frames<'a>(
        &self,
        frames: &'a [Frame],
        body_index: usize,
    ) -> Vec<PlayerFrame<'a>> {
        frames
            .iter()
            .filter_map(|frame| {
                frame.bodies.get(body_index).map(|body| PlayerFrame {
                    timestamp_seconds: frame.timestamp_seconds,
                    landmarks: &body.landmarks,
                })
            })
            .collect()
    }

    /// Infer the playing hand as the wrist with the larger cumulative
    /// frame-to-frame displacement. Ties go to the right hand.
    pub fn dominant_side(&self, frames: &[PlayerFrame<'_>]) -> Side {
        let left = self.wrist_activity(frames, PoseLandmark::LeftWrist);
        let right = self.wrist_activity(frames, PoseLandmark::RightWrist);

        if left > right {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Sum of L1 displacement of one landmark over consecutive visible pairs
    fn wrist_activity(&self, frames: &[PlayerFrame<'_>], wrist: PoseLandmark) -> f64 {
        frames
            .windows(2)
            .filter_map(|pair| {
                let prev = pair[0].visible_landmark(wrist, self.min_visibility)?;
                let curr = pair[1].visible_landmark(wrist, self.min_visibility)?;
                Some(curr.manhattan_2d(prev))
            })
            .sum()
    }

    /// Midpoint of shoulders and hips
    pub fn torso_center(&self, landmarks: &[Landmark]) -> Option<(f64, f64)> {
        let [ls, rs, lh, rh] = self.torso_landmarks(landmarks)?;
        let center_x = (ls.x + rs.x + lh.x + rh.x) / 4.0;
        let center_y = (ls.y + rs.y + lh.y + rh.y) / 4.0;
        Some((center_x, center_y))
    }

    /// Average shoulder-to-hip length
    pub fn torso_scale(&self, landmarks: &[Landmark]) -> Option<f64> {
        let [ls, rs, lh, rh] = self.torso_landmarks(landmarks)?;
        let scale = (ls.distance_2d(lh) + rs.distance_2d(rh)) / 2.0;
        (scale > f64::EPSILON).then_some(scale)
    }

    fn torso_landmarks<'a>(&self, landmarks: &'a [Landmark]) -> Option<[&'a Landmark; 4]> {
        let visible = |landmark: PoseLandmark| {
            landmarks
                .get(landmark.index())
                .filter(|lm| lm.is_visible(self.min_visibility))
        };

        Some([
            visible(PoseLandmark::LeftShoulder)?,
            visible(PoseLandmark::RightShoulder)?,
            visible(PoseLandmark::LeftHip)?,
            visible(PoseLandmark::RightHip)?,
        ])
    }

    /// Re-express landmarks relative to the torso centre, in torso lengths.
    /// Visibility is carried over unchanged.
    pub fn normalize_torso_relative(&self, landmarks: &[Landmark]) -> Option<Vec<Landmark>> {
        let scale = self.torso_scale(landmarks)?;
        let (center_x, center_y) = self.torso_center(landmarks)?;

        Some(
            landmarks
                .iter()
                .map(|lm| Landmark {
                    x: (lm.x - center_x) / scale,
                    y: (lm.y - center_y) / scale,
                    z: lm.z / scale,
                    visibility: lm.visibility,
                })
                .collect(),
        )
    }
}

impl Default for KeypointProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered moving average. Near the edges the window is shifted inward
/// and shrinks where the series runs out.
pub fn moving_average(values: &[f64], window_size: usize) -> Vec<f64> {
    let window_size = window_size.max(1);
    let half = window_size / 2;

    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (start + window_size).min(values.len());
            let window = &values[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

/// Indices of strict local minima whose prominence reaches `min_prominence`.
///
/// Prominence is the smaller of the rises from the trough to the nearest
/// local maximum on each side.
pub fn find_troughs(values: &[f64], min_prominence: f64) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }

    (1..values.len() - 1)
        .filter(|&i| values[i] < values[i - 1] && values[i] < values[i + 1])
        .filter(|&i| {
            let left_peak = climb(values, i, Direction::Backward);
            let right_peak = climb(values, i, Direction::Forward);
            let prominence = (left_peak - values[i]).min(right_peak - values[i]);
            prominence >= min_prominence
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Direction {
    Backward,
    Forward,
}

/// Follow the series uphill from `start` until it stops rising
fn climb(values: &[f64], start: usize, direction: Direction) -> f64 {
    let mut idx = start;
    loop {
        let next = match direction {
            Direction::Backward => idx.checked_sub(1),
            Direction::Forward => (idx + 1 < values.len()).then_some(idx + 1),
        };
        match next {
            Some(n) if values[n] >= values[idx] => idx = n,
            _ => return values[idx],
        }
    }
}
