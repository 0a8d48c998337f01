use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading language files into a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Directory or file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid language dictionary.
    #[error("failed to parse language file {}: {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Path of the directory or file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            RegistryError::Io { path, .. } | RegistryError::Load { path, .. } => path,
        }
    }
}
