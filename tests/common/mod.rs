// Synthetic pose data shared by the integration tests
#![allow(dead_code)]

use std::f64::consts::PI;

use tt_coach::{Body, Frame, Landmark, PoseLandmark, LANDMARK_COUNT};

pub const FPS: f64 = 30.0;

/// Route `tracing` output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("tt_coach=debug"))
        .with_test_writer()
        .try_init();
}

/// A player standing square to the camera, arms hanging
pub fn standing_pose() -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.15, 0.95); LANDMARK_COUNT];
    let points = [
        (PoseLandmark::LeftShoulder, 0.42, 0.30),
        (PoseLandmark::RightShoulder, 0.58, 0.30),
        (PoseLandmark::LeftElbow, 0.38, 0.42),
        (PoseLandmark::RightElbow, 0.62, 0.42),
        (PoseLandmark::LeftWrist, 0.40, 0.60),
        (PoseLandmark::RightWrist, 0.60, 0.60),
        (PoseLandmark::LeftPinky, 0.40, 0.63),
        (PoseLandmark::RightPinky, 0.60, 0.63),
        (PoseLandmark::LeftIndex, 0.40, 0.63),
        (PoseLandmark::RightIndex, 0.60, 0.63),
        (PoseLandmark::LeftThumb, 0.41, 0.62),
        (PoseLandmark::RightThumb, 0.59, 0.62),
        (PoseLandmark::LeftHip, 0.45, 0.55),
        (PoseLandmark::RightHip, 0.55, 0.55),
        (PoseLandmark::LeftKnee, 0.45, 0.72),
        (PoseLandmark::RightKnee, 0.55, 0.72),
        (PoseLandmark::LeftAnkle, 0.45, 0.90),
        (PoseLandmark::RightAnkle, 0.55, 0.90),
        (PoseLandmark::LeftHeel, 0.44, 0.92),
        (PoseLandmark::RightHeel, 0.56, 0.92),
        (PoseLandmark::LeftFootIndex, 0.46, 0.94),
        (PoseLandmark::RightFootIndex, 0.54, 0.94),
    ];
    for (landmark, x, y) in points {
        landmarks[landmark.index()] = Landmark::new(x, y, 0.95);
    }
    landmarks
}

pub fn set(pose: &mut [Landmark], landmark: PoseLandmark, x: f64, y: f64) {
    pose[landmark.index()] = Landmark::new(x, y, 0.95);
}

/// Shift every landmark horizontally
pub fn shift_x(pose: &mut [Landmark], dx: f64) {
    for landmark in pose.iter_mut() {
        landmark.x += dx;
    }
}

/// One single-body frame per pose, at 30 fps
pub fn frames_from_poses(poses: Vec<Vec<Landmark>>) -> Vec<Frame> {
    poses
        .into_iter()
        .enumerate()
        .map(|(i, landmarks)| Frame::new(i as f64 / FPS, vec![Body::new(landmarks)]))
        .collect()
}

/// A repetitive right-handed drill: the right wrist swings up and down
/// with `period` frames per repetition, peaking at `period / 2` of each
/// cycle. `adjust` receives the repetition index and may alter the pose.
pub fn drill_frames(
    repetitions: usize,
    period: usize,
    mut adjust: impl FnMut(usize, &mut Vec<Landmark>),
) -> Vec<Frame> {
    let poses = (0..=repetitions * period)
        .map(|i| {
            let mut pose = standing_pose();
            let phase = 2.0 * PI * i as f64 / period as f64;
            set(&mut pose, PoseLandmark::RightWrist, 0.6, 0.5 + 0.1 * phase.cos());
            adjust((i / period).min(repetitions.saturating_sub(1)), &mut pose);
            pose
        })
        .collect();
    frames_from_poses(poses)
}

/// Poses with the right wrist following `path`, everything else still
pub fn right_wrist_path(path: &[(f64, f64)]) -> Vec<Vec<Landmark>> {
    path.iter()
        .map(|&(x, y)| {
            let mut pose = standing_pose();
            set(&mut pose, PoseLandmark::RightWrist, x, y);
            pose
        })
        .collect()
}

/// Rest, an upward forehand swing over four frames, rest
pub fn forehand_swing_path() -> Vec<(f64, f64)> {
    let mut path = vec![(0.60, 0.60); 5];
    path.extend([(0.62, 0.58), (0.66, 0.54), (0.70, 0.50), (0.74, 0.47)]);
    path.extend(vec![(0.74, 0.47); 6]);
    path
}
