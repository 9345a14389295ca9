use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown lichess user: {0}")]
    UnknownUser(String),

    #[error("lichess API returned HTTP {status}")]
    Upstream { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
