//! Error type shared by every backend

use thiserror::Error;

/// Failures raised by the backend adapters.
///
/// Where available the message carries the native driver's own
/// diagnostic text. No operation retries internally, every failure
/// propagates to the immediate caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not establish or re-establish the native connection
    #[error("connection error: {0}")]
    Connection(String),

    /// A transaction control statement failed
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A query result reported a failure or missed expected data
    #[error("query error: {0}")]
    Query(String),

    /// A value does not match the wire format expected for its type tag
    #[error("format error: {0}")]
    Format(String),

    /// Text input could not be parsed into the target representation
    #[error("parse error: {0}")]
    Parse(String),

    /// A value exceeds the declared capacity of its column
    #[error("length error: {0}")]
    Length(String),

    /// The column's wire type has no codec
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A large object produced fewer bytes than it declared
    #[error("read {read} bytes instead of expected {expected}")]
    ShortRead { read: usize, expected: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}
