//! Error types for snapshot ingress and report egress
//!
//! - Ingress: file → [`Snapshot`](wcl_config::Snapshot)
//! - Export: validation result → JSON/CSV artifact

use std::path::PathBuf;

use wcl_config::ConfigError;

/// Errors while loading a snapshot file
#[derive(Debug, thiserror::Error)]
pub enum IngressError {
    /// Extension does not name a supported format
    #[error("no snapshot format for extension: '{0}'")]
    UnsupportedExtension(String),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File content does not decode
    #[error("cannot decode {path}: {source}")]
    Decode {
        /// File being decoded
        path: PathBuf,
        /// Underlying error
        #[source]
        source: ConfigError,
    },
}

impl IngressError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV encoding failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoded bytes could not be recovered from the writer
    #[error("flush failed: {0}")]
    Flush(std::io::Error),

    /// Encoded CSV is not UTF-8
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined I/O-boundary error
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Loading failed
    #[error("ingress error: {0}")]
    Ingress(#[from] IngressError),

    /// Exporting failed
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Result type alias for I/O-boundary operations
pub type IoResult<T> = Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingress_error_display() {
        let err = IngressError::UnsupportedExtension("toml".to_string());
        assert_eq!(err.to_string(), "no snapshot format for extension: 'toml'");
    }

    #[test]
    fn export_io_error_names_path() {
        let err = ExportError::io_error(
            "/tmp/out.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out.csv"));
    }

    #[test]
    fn combined_error_from_parts() {
        let err: IoError = IngressError::UnsupportedExtension("txt".into()).into();
        assert!(err.to_string().starts_with("ingress error"));
    }
}
