// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Error types for metric acquisition

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single metric family read
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data in {path:?}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("required field missing: {0}")]
    Missing(&'static str),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for sensor reads
pub type Result<T> = std::result::Result<T, SensorError>;

impl SensorError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: &Path, source: io::Error) -> Self {
        SensorError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a parse error for `path`
    pub fn parse<S: Into<String>>(path: &Path, detail: S) -> Self {
        SensorError::Parse {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }
}

/// Read a whole pseudo-file, tagging failures with its path
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SensorError::io(path, e))
}

/// Failure of an on-demand snapshot pull
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("snapshot acquisition failed: {0}")]
    Acquisition(String),
}
