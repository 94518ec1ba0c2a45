use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Side;

/// Tunables of the movement quality analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementQualityConfig {
    /// Which detected body to follow
    pub body_index: usize,
    /// Minimum usable frames before any analysis is attempted
    pub min_frames: usize,
    pub min_visibility: f64,
    /// Centered moving-average window over the wrist height series
    pub smoothing_window: usize,
    /// Minimum trough depth, in normalised units, to count as a repetition
    pub min_prominence: f64,
    /// Leading repetitions averaged into the reference pose
    pub reference_repetitions: usize,
    /// Landmark offset at which similarity drops to zero
    pub similarity_cutoff: f64,
    /// Per-axis offset above which a deviation is reported
    pub deviation_threshold: f64,
    pub max_deviations_per_repetition: usize,
    pub fatigue_window: usize,
    /// Final trend below this flags fatigue
    pub fatigue_trend_threshold: i32,
    pub common_deviation_count: usize,
}

impl Default for MovementQualityConfig {
    fn default() -> Self {
        Self {
            body_index: 0,
            min_frames: 5,
            min_visibility: 0.3,
            smoothing_window: 3,
            min_prominence: 0.02,
            reference_repetitions: 3,
            similarity_cutoff: 0.3,
            deviation_threshold: 0.04,
            max_deviations_per_repetition: 5,
            fatigue_window: 3,
            fatigue_trend_threshold: -10,
            common_deviation_count: 3,
        }
    }
}

impl MovementQualityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_visibility("movement.min_visibility", self.min_visibility)?;
        require_nonzero("movement.min_frames", self.min_frames)?;
        require_nonzero("movement.smoothing_window", self.smoothing_window)?;
        require_nonzero("movement.reference_repetitions", self.reference_repetitions)?;
        require_nonzero("movement.fatigue_window", self.fatigue_window)?;
        require_positive("movement.min_prominence", self.min_prominence)?;
        require_positive("movement.similarity_cutoff", self.similarity_cutoff)?;
        require_positive("movement.deviation_threshold", self.deviation_threshold)?;
        Ok(())
    }
}

/// Tunables of the rule-based shot classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotClassifierConfig {
    pub body_index: usize,
    pub min_frames: usize,
    pub min_visibility: f64,
    /// Per-frame wrist displacement that starts a stroke
    pub stroke_speed_threshold: f64,
    /// Fraction of the threshold a stroke must keep to continue
    pub continuation_ratio: f64,
    /// Frames examined after the trigger frame
    pub lookahead_frames: usize,
    /// Stroke frames, trigger included, needed to accept a stroke
    pub min_stroke_frames: usize,
    /// Frames skipped after an accepted stroke
    pub cooldown_frames: usize,
    /// Upward movement of the free hand that marks a ball toss
    pub serve_toss_threshold: f64,
    /// Frames before the anchor searched for a ball toss
    pub serve_window_frames: usize,
    /// Frames before/after the anchor used for the stroke type
    pub type_window_frames: usize,
    pub topspin_rise: f64,
    pub topspin_amplitude: f64,
    pub block_amplitude: f64,
    pub block_max_frames: usize,
    pub push_amplitude: f64,
    /// Strokes below this confidence are dropped
    pub min_confidence: f64,
    /// Playing hand from the player profile; inferred when absent
    pub handedness: Option<Side>,
    /// Scale thresholds by the player's apparent shoulder width
    pub body_scale_normalization: bool,
    pub reference_shoulder_width: f64,
}

impl Default for ShotClassifierConfig {
    fn default() -> Self {
        Self {
            body_index: 0,
            min_frames: 5,
            min_visibility: 0.3,
            stroke_speed_threshold: 0.015,
            continuation_ratio: 0.5,
            lookahead_frames: 5,
            min_stroke_frames: 2,
            cooldown_frames: 3,
            serve_toss_threshold: 0.03,
            serve_window_frames: 5,
            type_window_frames: 2,
            topspin_rise: 0.02,
            topspin_amplitude: 0.03,
            block_amplitude: 0.02,
            block_max_frames: 3,
            push_amplitude: 0.04,
            min_confidence: 0.0,
            handedness: None,
            body_scale_normalization: false,
            reference_shoulder_width: 0.15,
        }
    }
}

impl ShotClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_visibility("shots.min_visibility", self.min_visibility)?;
        require_nonzero("shots.min_frames", self.min_frames)?;
        require_positive("shots.stroke_speed_threshold", self.stroke_speed_threshold)?;
        require_positive("shots.serve_toss_threshold", self.serve_toss_threshold)?;
        require_positive("shots.reference_shoulder_width", self.reference_shoulder_width)?;
        if !(0.0..=1.0).contains(&self.continuation_ratio) {
            return Err(ConfigError::Invalid {
                field: "shots.continuation_ratio",
                reason: format!("{} is outside 0..=1", self.continuation_ratio),
            });
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid {
                field: "shots.min_confidence",
                reason: format!("{} is outside 0..=1", self.min_confidence),
            });
        }
        Ok(())
    }
}

/// Tunables of torso-normalised pose comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseComparisonConfig {
    pub min_visibility: f64,
    /// Distance, in torso lengths, above which a landmark is reported
    pub deviation_tolerance: f64,
    /// Distance, in torso lengths, at which similarity drops to zero
    pub similarity_cutoff: f64,
}

impl Default for PoseComparisonConfig {
    fn default() -> Self {
        Self {
            min_visibility: 0.3,
            deviation_tolerance: 0.15,
            similarity_cutoff: 1.0,
        }
    }
}

impl PoseComparisonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_visibility("comparison.min_visibility", self.min_visibility)?;
        require_positive("comparison.deviation_tolerance", self.deviation_tolerance)?;
        require_positive("comparison.similarity_cutoff", self.similarity_cutoff)?;
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} must be a positive number", value),
        })
    }
}

fn require_nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        })
    }
}

fn require_visibility(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is outside 0..=1", value),
        })
    }
}
