//! Error types for raw request parsing.

use thiserror::Error;

/// Why captured request text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Empty request")]
    EmptyRequest,

    /// The request head is not UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// The first line is not `METHOD URI VERSION`.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A header line has no `name: value` separator.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),

    #[error("Required header is missing: {0}")]
    MissingHeader(String),
}
