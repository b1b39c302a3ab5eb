use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnakeError {
    #[error("no empty cell left to place food on")]
    NoSpace,

    #[error("queue is empty")]
    Empty,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
