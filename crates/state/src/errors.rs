use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("unknown model status code: {0}")]
    UnknownStatus(u8),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
