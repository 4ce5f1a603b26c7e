use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{resource}: missing required field(s): {}", .missing.join(", "))]
    Validation {
        resource: &'static str,
        missing: Vec<String>,
    },
    #[error("HTTP {status} from {method} {path}")]
    Http {
        status: u16,
        method: String,
        path: String,
        body: String,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("action is not available for this viewer")]
    NotPermitted,
    #[error("another action is already in flight")]
    Busy,
    #[error("modal is closed")]
    Closed,
    #[error("no user is logged in")]
    NoSession,
    #[error("acknowledgements are tracked for employee {tracker}, not viewer {viewer}")]
    TrackerMismatch { viewer: i64, tracker: i64 },
    #[error(transparent)]
    Api(#[from] ApiError),
}
