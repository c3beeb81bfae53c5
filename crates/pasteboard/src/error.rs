//! Error types for clipboard access.

use thiserror::Error;

/// Errors raised by a [`Pasteboard`](crate::Pasteboard) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasteboardError {
    /// The system clipboard could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Reading clipboard contents failed.
    #[error("failed to read clipboard: {0}")]
    Read(String),

    /// The clipboard refused a write.
    #[error("failed to write clipboard: {0}")]
    Write(String),
}
