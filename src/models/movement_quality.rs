use serde::Serialize;

use super::landmark::{Landmark, Side};

/// Vertical or horizontal offset of one landmark against the reference pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviationDirection {
    /// Lower in the image than the reference
    #[serde(rename = "tiefer")]
    Lower,
    #[serde(rename = "höher")]
    Higher,
    #[serde(rename = "weiter rechts")]
    FurtherRight,
    #[serde(rename = "weiter links")]
    FurtherLeft,
}

impl DeviationDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "tiefer",
            Self::Higher => "höher",
            Self::FurtherRight => "weiter rechts",
            Self::FurtherLeft => "weiter links",
        }
    }

    /// Direction of a vertical offset (image y grows downward)
    pub fn vertical(dy: f64) -> Self {
        if dy > 0.0 {
            Self::Lower
        } else {
            Self::Higher
        }
    }

    pub fn horizontal(dx: f64) -> Self {
        if dx > 0.0 {
            Self::FurtherRight
        } else {
            Self::FurtherLeft
        }
    }
}

/// A flagged deviation of one landmark at a repetition's peak
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationRecord {
    /// Display name of the landmark, e.g. "Rechter Ellbogen"
    pub landmark_name: &'static str,
    pub direction: DeviationDirection,
    /// Absolute offset in normalised units
    pub amount: f64,
    pub description: String,
}

/// One repetition of a drilled stroke
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repetition {
    pub timestamp_seconds: f64,
    /// Index into the extracted player frames
    pub frame_index: usize,
    /// Pose at the wrist's highest point
    pub peak_pose: Vec<Landmark>,
    pub dominant_side: Side,
    /// Set once a reference pose exists; `None` for sessions too short to score
    pub consistency_score: Option<u8>,
    pub deviations: Vec<DeviationRecord>,
}

/// Smoothed consistency at one repetition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FatiguePoint {
    pub index: usize,
    pub timestamp_seconds: f64,
    /// Windowed mean score, rounded
    pub score: i32,
    /// Windowed mean minus the initial baseline, rounded
    pub trend: i32,
}

/// A deviation that recurs across the session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonDeviation {
    pub landmark_name: &'static str,
    pub direction: DeviationDirection,
    pub description: String,
    /// Number of repetitions showing this deviation
    pub count: usize,
    /// Share of repetitions showing this deviation, percent
    pub frequency: u32,
}

/// Session-level aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementSummary {
    pub total_repetitions: usize,
    pub average_consistency: u8,
    pub best_score: u8,
    pub worst_score: u8,
    /// Population standard deviation of the consistency scores
    pub score_std_dev: f64,
    pub dominant_side: Side,
    pub fatigue_detected: bool,
    pub common_deviations: Vec<CommonDeviation>,
}

/// Full result of a movement quality run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementAnalysis {
    pub repetitions: Vec<Repetition>,
    pub summary: Option<MovementSummary>,
    pub fatigue_curve: Vec<FatiguePoint>,
}

impl MovementAnalysis {
    /// The empty result returned for unusable input
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty() && self.summary.is_none() && self.fatigue_curve.is_empty()
    }
}
