//! Error types for yurimerge-core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a merge. All of them are fatal.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no source headers configured")]
    EmptySourceList,

    #[error("invalid include guard symbol: {0:?}")]
    InvalidGuard(String),

    #[error("cannot open input header {}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read input header {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open output file {}", path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output file {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize merge report: {0}")]
    Report(#[from] serde_json::Error),
}

impl MergeError {
    /// Path of the file the error is about, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            MergeError::OpenInput { path, .. }
            | MergeError::ReadInput { path, .. }
            | MergeError::OpenOutput { path, .. }
            | MergeError::WriteOutput { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
