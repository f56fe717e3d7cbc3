//! Front-end error types.

use amper_tree::{StaleNodeError, TreeError};
use thiserror::Error;

/// Errors that can occur while reading a tree into a value table.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Invalid reader options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tree was replaced or a visitor rejected a node mid-read.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

impl FrontendError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<StaleNodeError> for FrontendError {
    fn from(err: StaleNodeError) -> Self {
        Self::Tree(err.into())
    }
}
