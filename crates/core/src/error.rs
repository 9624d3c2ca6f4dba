use thiserror::Error;

use crate::export::ExportFormat;

#[derive(Error, Debug)]
pub enum MeetlensError {
    #[error("Analysis not complete or failed (status: {status})")]
    NotReady { status: String },

    #[error("Failed to load meeting insights: {0}")]
    FetchFailed(#[from] reqwest::Error),

    #[error("Backend answered with unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{format} export failed: {reason}")]
    ExportFailed { format: ExportFormat, reason: String },

    #[error("Chat request failed: {reason}")]
    ChatFailed { reason: String },

    #[error("A chat message is already being sent")]
    ChatInFlight,

    #[error("Chat message is empty")]
    EmptyMessage,

    #[error("Missing configuration: {env_var} environment variable is not set")]
    MissingConfig { env_var: String },
}

impl MeetlensError {
    /// True for the two conditions that end an insight fetch.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            MeetlensError::NotReady { .. }
                | MeetlensError::FetchFailed(_)
                | MeetlensError::UnexpectedStatus { .. }
                | MeetlensError::JsonError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MeetlensError>;
