use thiserror::Error;

pub type Result<T> = std::result::Result<T, DaybriefError>;

#[derive(Debug, Error)]
pub enum DaybriefError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("userQuery is required for the insight action")]
    MissingQuery,

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("Gemini API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        source: Box<DaybriefError>,
    },

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DaybriefError {
    /// Whether this failure is a transient upstream overload worth retrying.
    ///
    /// Matches a 503 status or an overload-indicating error body; everything
    /// else (validation, configuration, other HTTP statuses, parse failures)
    /// propagates on first occurrence.
    pub fn is_transient(&self) -> bool {
        match self {
            DaybriefError::Upstream { status, body } => {
                *status == 503 || body.contains("503") || body.contains("overloaded")
            }
            _ => false,
        }
    }

    /// Whether this failure is the caller's fault (HTTP 400 territory).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DaybriefError::MissingQuery | DaybriefError::InvalidAction(_)
        )
    }
}
