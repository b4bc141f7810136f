use thiserror::Error;

#[derive(Error, Debug)]
pub enum KickError {
    #[error("Invalid kick parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No goal-scoring trajectory found in the searched parameter grid")]
    NoSolution,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KickError>;
