mod analysis;

pub use analysis::{MovementQualityConfig, PoseComparisonConfig, ShotClassifierConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// Analysis configuration for all pipelines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub movement: MovementQualityConfig,
    pub shots: ShotClassifierConfig,
    pub comparison: PoseComparisonConfig,
}

impl AnalysisConfig {
    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.shots.validate()?;
        self.comparison.validate()?;
        Ok(())
    }

    /// Apply overrides from environment variables
    ///
    /// - `TT_COACH_BODY_INDEX`: body followed by both pipelines
    /// - `TT_COACH_MIN_VISIBILITY`: landmark confidence floor everywhere
    /// - `TT_COACH_STROKE_SPEED_THRESHOLD`: shot trigger speed
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(body_index) = env_override::<usize>("TT_COACH_BODY_INDEX")? {
            self.movement.body_index = body_index;
            self.shots.body_index = body_index;
        }

        if let Some(min_visibility) = env_override::<f64>("TT_COACH_MIN_VISIBILITY")? {
            self.movement.min_visibility = min_visibility;
            self.shots.min_visibility = min_visibility;
            self.comparison.min_visibility = min_visibility;
        }

        if let Some(threshold) = env_override::<f64>("TT_COACH_STROKE_SPEED_THRESHOLD")? {
            self.shots.stroke_speed_threshold = threshold;
        }

        self.validate()?;
        Ok(self)
    }
}

fn env_override<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { name, value }),
        Err(_) => Ok(None),
    }
}
