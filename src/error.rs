//! Typed error types for the finder session layer.
//!
//! Cancelling a prompt is not an error; it is reported as
//! `tree::Outcome::Cancelled`.

use crate::host::HostError;
use thiserror::Error;

/// Top-level error type for pane and session operations.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The host refused to create or configure a pane window.
    #[error("Host surface error for '{name}': {source}")]
    HostSurface {
        /// Buffer name of the pane being set up.
        name: String,
        #[source]
        source: HostError,
    },

    /// Writing rendered lines into the pane buffer failed.
    #[error("Render failed for '{name}': {source}")]
    Render {
        /// Buffer name of the pane being rendered.
        name: String,
        #[source]
        source: HostError,
    },

    /// No focused host buffer matches the pane's buffer name.
    #[error("finder buffer not found")]
    BufferNotFound,

    /// Any other host primitive failed.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// The tree model failed.
    #[error("Tree model error: {0}")]
    Tree(String),

    /// A command name that is not in the command table.
    #[error("Unknown finder command: {0}")]
    UnknownCommand(String),
}

impl FinderError {
    pub fn tree(message: impl Into<String>) -> Self {
        FinderError::Tree(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
