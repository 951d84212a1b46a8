use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LeadError>;
