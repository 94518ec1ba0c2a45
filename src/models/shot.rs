use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::landmark::Side;

/// Which side of the body the stroke is played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotSide {
    Forehand,
    Backhand,
}

impl ShotSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forehand => "forehand",
            Self::Backhand => "backhand",
        }
    }
}

/// Stroke technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeType {
    Topspin,
    Push,
    Block,
    Serve,
}

impl StrokeType {
    pub const ALL: [StrokeType; 4] = [Self::Topspin, Self::Push, Self::Block, Self::Serve];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topspin => "topspin",
            Self::Push => "push",
            Self::Block => "block",
            Self::Serve => "serve",
        }
    }
}

/// Full shot label, one of the 8 side x stroke combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShotType {
    pub side: ShotSide,
    pub stroke: StrokeType,
}

impl ShotType {
    pub fn new(side: ShotSide, stroke: StrokeType) -> Self {
        Self { side, stroke }
    }

    /// Machine label, e.g. `forehand_topspin`
    pub fn label(self) -> String {
        format!("{}_{}", self.side.as_str(), self.stroke.as_str())
    }

    /// German display label, e.g. `VH Topspin`
    pub fn display_label(self) -> &'static str {
        match (self.side, self.stroke) {
            (ShotSide::Forehand, StrokeType::Serve) => "VH Aufschlag",
            (ShotSide::Backhand, StrokeType::Serve) => "RH Aufschlag",
            (ShotSide::Forehand, StrokeType::Topspin) => "VH Topspin",
            (ShotSide::Backhand, StrokeType::Topspin) => "RH Topspin",
            (ShotSide::Forehand, StrokeType::Push) => "VH Schupf",
            (ShotSide::Backhand, StrokeType::Push) => "RH Schupf",
            (ShotSide::Forehand, StrokeType::Block) => "VH Block",
            (ShotSide::Backhand, StrokeType::Block) => "RH Block",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.side.as_str(), self.stroke.as_str())
    }
}

impl Serialize for ShotType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One detected stroke
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotEvent {
    pub timestamp_seconds: f64,
    /// Index into the extracted player frames of the peak-speed frame
    pub frame_index: usize,
    pub shot_type: ShotType,
    pub side: ShotSide,
    #[serde(rename = "type")]
    pub stroke_type: StrokeType,
    /// 0-1
    pub confidence: f64,
    /// Peak per-frame wrist displacement
    pub wrist_speed: f64,
}

/// Per-label tallies over a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotStats {
    pub total_shots: usize,
    /// Keyed by shot label, e.g. `backhand_push`
    pub shot_type_counts: BTreeMap<String, usize>,
    pub side_distribution: BTreeMap<ShotSide, usize>,
    pub type_distribution: BTreeMap<StrokeType, usize>,
    /// Mean confidence as a percentage
    pub avg_confidence: u8,
    /// Share of forehand shots, percent
    pub forehand_share: u8,
}

/// Where the dominant hand came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSource {
    /// Given explicitly from the player profile
    Profile,
    /// Inferred from wrist activity
    Auto,
}

/// Parameters the classifier actually ran with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotAnalysisMeta {
    pub dominant_side: Side,
    pub hand_source: HandSource,
    pub body_scale: f64,
    pub stroke_speed_threshold: f64,
}

/// Full result of a shot classification run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotAnalysis {
    pub shots: Vec<ShotEvent>,
    pub stats: Option<ShotStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ShotAnalysisMeta>,
}

impl ShotAnalysis {
    /// The empty result returned for unusable input
    pub fn empty() -> Self {
        Self::default()
    }
}
