//! Error types.

use crate::schema::FieldKind;
use std::path::PathBuf;
use thiserror::Error;

/// The schema description does not match the values it describes.
///
/// These indicate a miscalibrated tool rather than a bad configuration file,
/// and are never swallowed.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field `{path}` is declared as {declared} but holds a {found} value")]
    KindMismatch {
        path: String,
        declared: FieldKind,
        found: &'static str,
    },

    #[error("field `{path}` is declared more than once")]
    DuplicateField { path: String },

    #[error("field name `{name}` must not contain '.' (under `{prefix}`)")]
    InvalidName { prefix: String, name: &'static str },

    #[error("schema nesting exceeds {limit} levels at `{path}`")]
    TooDeep { path: String, limit: usize },
}

/// Failure reading or decoding a YAML document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure of a single check invocation.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("could not find any configuration file")]
    NotFound,

    #[error("could not read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("could not check configuration: {0}")]
    Schema(#[from] SchemaError),
}

impl CheckError {
    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            CheckError::NotFound => "not_found",
            CheckError::Read { .. } => "unreadable",
            CheckError::Invalid { .. } => "invalid",
            CheckError::Schema(_) => "schema_error",
        }
    }
}
