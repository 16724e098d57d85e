use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the location registry.
///
/// Expansion itself is infallible: once a registry is constructed, lookups
/// degrade to literal passthrough rather than failing.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("duplicate location key in registry: {0}")]
    DuplicateKey(String),

    #[error("failed to parse location dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read location dataset at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
