use serde::Serialize;

use super::landmark::BodyGroup;

/// Offset of a landmark after torso normalisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// A landmark that sits too far from its reference position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseDeviation {
    /// Landmark index in the 33-point model
    pub landmark: usize,
    pub group: BodyGroup,
    /// Distance in torso lengths
    pub distance: f64,
    pub direction: Offset,
}

/// Result of comparing one pose against a reference pose
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseComparison {
    /// 0-100, 100 = identical after normalisation
    pub similarity: u8,
    pub compared_landmarks: usize,
    /// Sorted by distance, largest first
    pub deviations: Vec<PoseDeviation>,
}
