use std::path::PathBuf;

use thiserror::Error;

/// Feil som stopper hele ingestion-kallet. Tom fil (ingen trackpoints) er
/// ikke en feil, se `IngestOutcome::Empty`.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// Kort, stabil nøkkel for telemetri og CLI-meldinger.
    pub fn reason(&self) -> &'static str {
        match self {
            IngestError::UnsupportedFormat(_) => "unsupported_format",
            IngestError::MalformedDocument(_) => "malformed_document",
            IngestError::Io { .. } => "io",
            IngestError::Config(_) => "config",
            IngestError::Json(_) => "json",
        }
    }
}
