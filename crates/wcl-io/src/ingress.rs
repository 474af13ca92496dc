//! Snapshot loading
//!
//! The format is chosen from the file extension: `.json`, or `.yaml`/`.yml`.

use std::path::Path;

use wcl_config::Snapshot;

use crate::error::IngressError;

/// Supported snapshot encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// JSON document
    Json,

    /// YAML document
    Yaml,
}

impl SnapshotFormat {
    /// Supported file extensions (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Detect format from a path's extension
    ///
    /// # Errors
    /// Returns [`IngressError::UnsupportedExtension`] when the extension is
    /// missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, IngressError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .ok_or(IngressError::UnsupportedExtension(ext))
    }

    /// Decode content in this format
    ///
    /// # Errors
    /// Returns the decoder's error when the content is malformed.
    pub fn parse(self, content: &str) -> Result<Snapshot, wcl_config::ConfigError> {
        match self {
            Self::Json => Snapshot::from_json(content),
            Self::Yaml => Snapshot::from_yaml(content),
        }
    }
}

/// Read and decode a snapshot file
///
/// # Errors
/// Fails on an unknown extension, an unreadable file or malformed content.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, IngressError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;

    let content =
        std::fs::read_to_string(path).map_err(|e| IngressError::io_error(path, e))?;
    let snapshot = format.parse(&content).map_err(|source| IngressError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Loaded {} ({} generators, {} pressures, {} systems, {} eras)",
        path.display(),
        snapshot.generators.len(),
        snapshot.pressures.len(),
        snapshot.systems.len(),
        snapshot.eras.len()
    );

    Ok(snapshot)
}
