//! The error kinds raised while reading and filtering access logs.
//!
//! Per-line problems (`MalformedLine`, `MalformedDate` during ingestion) never abort a read;
//! they are collected in the `IngestReport` and logged. The other kinds are returned to the caller.
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("cannot read log file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("incorrect log formatting at line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },

    #[error("malformed date: {text}")]
    MalformedDate { text: String },

    #[error("no log records available")]
    EmptyView,
}

impl LogError {
    /// True for the errors that only drop a single line during ingestion.
    pub fn is_per_line(&self) -> bool {
        matches!(self, LogError::MalformedLine { .. } | LogError::MalformedDate { .. })
    }
}
