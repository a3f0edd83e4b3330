use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Transcript fetch failed for {video_id}: {reason}")]
    TranscriptFailed { video_id: String, reason: String },

    #[error("Notes generation failed: {reason}")]
    SummaryFailed { reason: String },

    #[error("Model listing failed: {reason}")]
    ModelListFailed { reason: String },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotesError>;
