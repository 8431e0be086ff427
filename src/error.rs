use thiserror::Error;

/// Errors produced while decoding server payloads and configuration values.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed json payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown alert category `{0}`")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
