use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not authenticated: {0}. Run 'inno login' first")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    #[error("Could not load roster: {0}")]
    Transport(String),

    #[error("{0}")]
    Server(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("A team submission is already in progress")]
    SubmissionInFlight,

    #[error("You already belong to team '{0}'")]
    AlreadyInTeam(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session file at {path}: {source}")]
    SessionWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Coarse classification used when reporting failures to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Validation,
    Transport,
    Server,
    Local,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Auth(_) => ErrorKind::Auth,
            AppError::Validation(_) | AppError::AlreadyInTeam(_) => ErrorKind::Validation,
            AppError::Http(_) | AppError::Transport(_) | AppError::Cancelled => {
                ErrorKind::Transport
            }
            AppError::Server(_) => ErrorKind::Server,
            _ => ErrorKind::Local,
        }
    }

    pub fn missing_credential() -> Self {
        AppError::Auth("missing credential".to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
