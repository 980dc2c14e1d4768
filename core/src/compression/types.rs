// compression/types.rs
//! Run records, codec errors and the codec traits.
use thiserror::Error;

use crate::types::ErrorKind;

/// One `(count, value)` record. `count` is never 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunRecord {
    pub count: u8,
    pub value: u8,
}

impl RunRecord {
    #[inline]
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.count, self.value]
    }

    /// Rejects `count == 0`; `offset` is only used for the error.
    #[inline]
    pub fn from_bytes(count: u8, value: u8, offset: usize) -> Result<Self, CompressionError> {
        if count == 0 {
            return Err(CompressionError::ZeroRunLength { offset });
        }
        Ok(Self { count, value })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// Record stream ended with a dangling count byte.
    #[error("record stream has odd length {len}: trailing count byte without value")]
    OddLength { len: usize },

    /// A record claimed a run of zero bytes.
    #[error("zero run length in record at offset {offset}")]
    ZeroRunLength { offset: usize },
}

impl CompressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressionError::OddLength { .. } | CompressionError::ZeroRunLength { .. } => {
                ErrorKind::ProtocolViolation
            }
        }
    }
}

pub trait Compressor {
    /// Compress a single chunk into out buffer.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
    /// Flush any pending state.
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

pub trait Decompressor {
    /// Decompress a single chunk into out buffer. The chunk must hold whole records.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
