//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Target error: {0}")]
    Target(String),
}
