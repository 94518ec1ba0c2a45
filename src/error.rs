use thiserror::Error;

/// Errors raised while loading or validating analysis configuration.
///
/// The analysis pipelines themselves never fail; short or noisy input
/// yields empty results instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("Invalid environment override {name}={value}")]
    Env { name: &'static str, value: String },
}
