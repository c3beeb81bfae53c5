//! Error types for payload decoding.

use thiserror::Error;

/// The payload bytes are not a property list.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is empty")]
    Empty,

    #[error("payload is neither a binary nor an XML property list")]
    UnknownFormat,

    #[error("malformed property list: {0}")]
    Malformed(#[from] plist::Error),
}
