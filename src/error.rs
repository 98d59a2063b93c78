use std::fmt;

#[derive(Debug)]
pub enum LensError {
    ApiError {
        status: u16,
        message: String,
    },
    GenerationError(String),
    ConfigError(String),
    InvalidImage(String),
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
    IncompleteAnswers,
    EmptyHistory,
    SessionNotFound(String),
    StorageError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    Other(String),
}

impl fmt::Display for LensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            LensError::GenerationError(msg) => write!(f, "Generation error: {}", msg),
            LensError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            LensError::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            LensError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while in the {} step", action, from)
            }
            LensError::IncompleteAnswers => write!(f, "Every question needs an answer"),
            LensError::EmptyHistory => write!(f, "The archive is empty"),
            LensError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            LensError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            LensError::NetworkError(e) => write!(f, "Network error: {}", e),
            LensError::IoError(e) => write!(f, "IO error: {}", e),
            LensError::JsonError(e) => write!(f, "JSON error: {}", e),
            LensError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for LensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LensError::NetworkError(e) => Some(e),
            LensError::IoError(e) => Some(e),
            LensError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LensError {
    fn from(err: reqwest::Error) -> Self {
        LensError::NetworkError(err)
    }
}

impl From<std::io::Error> for LensError {
    fn from(err: std::io::Error) -> Self {
        LensError::IoError(err)
    }
}

impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        LensError::JsonError(err)
    }
}

impl From<anyhow::Error> for LensError {
    fn from(err: anyhow::Error) -> Self {
        LensError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LensError>;
