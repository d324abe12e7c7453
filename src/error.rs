use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

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

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API URL configured. Set TASKBOARD_API_URL or run `taskboard init` to point the CLI at your tracker"
    )]
    MissingApiUrl,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to store credentials at {path}: {source}")]
    TokenStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not logged in. Run `taskboard login` first")]
    NotLoggedIn,

    #[error("No project selected. Pass --project <id> or run `taskboard project select <id>`")]
    NoProjectSelected,

    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Issue not found: {0}")]
    IssueNotFound(i64),
}

pub type Result<T> = std::result::Result<T, TaskboardError>;
