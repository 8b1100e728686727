use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("unreadable input: {0}")]
    UnreadableInput(String),

    #[error("failed to write totals workbook: {0}")]
    Export(String),

    #[error("failed to build report document: {0}")]
    Report(String),

    #[error("summary failed: {0}")]
    Summary(String),

    #[error("summary service returned HTTP {status}: {body}")]
    SummaryHttp { status: u16, body: String },

    #[error("no API key configured. Pass --api-key or set OPENAI_API_KEY")]
    MissingApiKey,

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("{failed} of {total} file(s) could not be processed")]
    BatchFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
