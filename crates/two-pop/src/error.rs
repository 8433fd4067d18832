//! Error type shared by the whole crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::params::ParameterKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parameter `{name}` expects {expected}, got {found}")]
    ParameterType {
        name: String,
        expected: ParameterKind,
        found: ParameterKind,
    },

    #[error("invalid value for parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("parameter `{0}` missing from the [parameters] section")]
    MissingParameter(&'static str),

    #[error("parameter file has no [{0}] section")]
    MissingSection(&'static str),

    #[error("malformed parameter file: {0}")]
    ParameterFile(#[from] toml::de::Error),

    #[error("could not serialize parameters: {0}")]
    ParameterSerialize(#[from] toml::ser::Error),

    #[error("result field `{field}` not found at {path}")]
    MissingField { field: &'static str, path: PathBuf },

    #[error("malformed value in {path} (line {line}): {reason}")]
    MalformedField {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("field `{field}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("results written with schema v{found}, newest supported is v{supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("size distribution reconstruction failed: {0}")]
    Reconstruction(String),

    #[error("invalid integrator input: {0}")]
    IntegratorInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
