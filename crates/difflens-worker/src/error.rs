use thiserror::Error;

use difflens_protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker has shut down")]
    Closed,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    Internal(String),
}

pub type WorkerResult<T> = Result<T, WorkerError>;
