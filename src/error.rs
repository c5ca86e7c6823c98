use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found: '{path}' at '{reference}'")]
    NotFound { reference: String, path: String },
    #[error("Cannot display '{path}' inline: {reason}")]
    Unsupported { path: String, reason: String },
    #[error("Not a git repository: {0}")]
    NotARepository(git2::Error),
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(reference: &str, path: &str) -> Self {
        Error::NotFound {
            reference: reference.to_string(),
            path: path.to_string(),
        }
    }

    pub fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        Error::Unsupported {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotFound { .. } => 2,
            Error::Unsupported { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
