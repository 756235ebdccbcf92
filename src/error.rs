// src/error.rs

use std::path::PathBuf;

/// Result type alias used across the ingestion layer.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Hard failures surfaced to the caller.
///
/// Structural problems inside a file (a block without the requested columns, a marker
/// whose columns are missing, an unknown model) are not errors: they are logged and
/// produce a partial result.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed TRC file {path}: {reason}")]
    MalformedTrc { path: PathBuf, reason: String },

    #[error("No analyzable file found in {dir} (htr: {htr_found}, trc: {trc_found})")]
    NoSessionFiles {
        dir: PathBuf,
        htr_found: bool,
        trc_found: bool,
    },

    #[error("Analysis process exited with {status}: {stderr}")]
    AnalysisFailed { status: String, stderr: String },

    #[error("Analysis process returned no output")]
    AnalysisEmptyOutput,

    #[error("Analysis process returned invalid JSON: {0}")]
    AnalysisInvalidJson(String),

    #[error("Invalid settings: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// src/error.rs
