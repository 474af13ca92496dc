//! Error types for snapshot decoding

/// Errors raised while decoding a configuration snapshot
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input is not valid JSON or does not fit the snapshot shape
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Input is not valid YAML or does not fit the snapshot shape
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}
