use std::fmt;
use std::io;

use thiserror::Error;

use crate::compression::CompressionError;
use crate::config::ConfigError;

/// Coarse classification of every failure a transform can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed compressed data or corrupt record framing.
    ProtocolViolation,
    /// The operation is not offered by this stream.
    UnsupportedOperation,
    /// The requested key never appeared before the source ended.
    KeyNotFound,
    /// The wrapped source or sink failed.
    Io,
    /// Bad arguments: key, offset/count range, configuration.
    InvalidInput,
}

/// Byte-stream operations a caller may attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Seek,
    Length,
    Flush,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Seek => "seek",
            Operation::Length => "length",
            Operation::Flush => "flush",
        };
        f.write_str(name)
    }
}

/// Framing errors of the resource wire format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Bytes following a matched key were not `00 01`.
    #[error("expected separator 00 01 after key, found {}", hex::encode(found))]
    MissingSeparator { found: Vec<u8> },

    /// The source ended inside the separator that follows the key.
    #[error("source ended inside the key separator")]
    TruncatedSeparator,

    /// The source ended before the value terminator.
    #[error("source ended before value terminator ({read} value bytes read)")]
    TruncatedValue { read: u64 },

    /// `00` followed by something other than `00` or `01`.
    #[error("invalid escape sequence 00 {0:02x}")]
    InvalidEscape(u8),
}

/// Unified error for both transforms.
/// - Ergonomic `From<T>` impls enable `?` across codec, config and I/O layers.
/// - `kind()` exposes the coarse taxonomy callers branch on.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error from the wrapped source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Run-length payload could not be decoded.
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// Resource wire framing is corrupt.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// The operation is disallowed for this stream's capabilities.
    #[error("unsupported operation: {op} on {stream}")]
    Unsupported { op: Operation, stream: &'static str },

    /// Key absent before end of source.
    #[error("key {key:?} not found before end of source")]
    KeyNotFound { key: String },

    /// Key rejected at construction.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// `offset`/`count` do not describe a slice of the caller's buffer.
    #[error("invalid range: offset {offset} + count {count} exceeds buffer length {len}")]
    InvalidRange { offset: usize, count: usize, len: usize },

    /// Configuration rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An earlier failure left this instance unusable.
    #[error("stream is unusable after an earlier failure")]
    Poisoned,
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::Io(_) => ErrorKind::Io,
            StreamError::Compression(e) => e.kind(),
            StreamError::Protocol(_) | StreamError::Poisoned => ErrorKind::ProtocolViolation,
            StreamError::Unsupported { .. } => ErrorKind::UnsupportedOperation,
            StreamError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            StreamError::InvalidKey(_)
            | StreamError::InvalidRange { .. }
            | StreamError::Config(_) => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn unsupported(op: Operation, stream: &'static str) -> Self {
        StreamError::Unsupported { op, stream }
    }

    /// Whether raising this error must leave the instance unusable.
    pub(crate) fn poisons(&self) -> bool {
        !matches!(
            self,
            StreamError::Unsupported { .. } | StreamError::InvalidRange { .. } | StreamError::Poisoned
        )
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match e.kind() {
            ErrorKind::Io => match e {
                StreamError::Io(inner) => return inner,
                _ => io::ErrorKind::Other,
            },
            ErrorKind::ProtocolViolation => io::ErrorKind::InvalidData,
            ErrorKind::UnsupportedOperation => io::ErrorKind::Unsupported,
            ErrorKind::KeyNotFound => io::ErrorKind::NotFound,
            ErrorKind::InvalidInput => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, e)
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
