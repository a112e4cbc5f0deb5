use std::{io, time::Duration};

use thiserror::Error;

/// Failure to read the socket table. Always recovered by showing an empty
/// set for the cycle; the next tick is the retry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("socket table unavailable: {0}")]
    Unavailable(String),

    #[error("socket table query exceeded {0:?}")]
    TimedOut(Duration),

    #[error("socket table worker failed: {0}")]
    Worker(String),
}

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize terminal: {0}")]
    RenderInit(#[source] io::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
