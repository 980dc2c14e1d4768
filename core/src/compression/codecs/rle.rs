// compression/codecs/rle.rs
//! Literal run-length codec: every run becomes a `[count][value]` record.
//!
//! Runs are capped at 255 bytes; longer runs split into several records, so
//! the encoded length is always even and `count` is never 0.
use std::iter::{FusedIterator, Peekable};

use crate::compression::constants::{MAX_RUN_LENGTH, RECORD_LEN};
use crate::compression::types::{CompressionError, Compressor, Decompressor, RunRecord};

/// Lazy encoder over any byte iterator. Finite, not restartable.
pub struct RunLengthEncoder<I: Iterator<Item = u8>> {
    input: Peekable<I>,
}

impl<I: Iterator<Item = u8>> RunLengthEncoder<I> {
    pub fn new(input: I) -> Self {
        Self { input: input.peekable() }
    }
}

impl<I: Iterator<Item = u8>> Iterator for RunLengthEncoder<I> {
    type Item = RunRecord;

    fn next(&mut self) -> Option<RunRecord> {
        let value = self.input.next()?;
        let mut count = 1u8;
        while count < MAX_RUN_LENGTH && self.input.next_if_eq(&value).is_some() {
            count += 1;
        }
        Some(RunRecord { count, value })
    }
}

/// Lazy decoder over an encoded byte iterator.
///
/// Yields decoded bytes; a dangling count byte or a zero count yields one
/// error and then the iterator ends.
pub struct RunLengthDecoder<I: Iterator<Item = u8>> {
    input: I,
    /// Bytes still owed by the current record.
    remaining: u8,
    value: u8,
    /// Encoded bytes consumed so far.
    offset: usize,
    failed: bool,
}

impl<I: Iterator<Item = u8>> RunLengthDecoder<I> {
    pub fn new(input: I) -> Self {
        Self { input, remaining: 0, value: 0, offset: 0, failed: false }
    }
}

impl<I: Iterator<Item = u8>> Iterator for RunLengthDecoder<I> {
    type Item = Result<u8, CompressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            if self.failed {
                return None;
            }
            let count = self.input.next()?;
            let record_offset = self.offset;
            self.offset += 1;

            let Some(value) = self.input.next() else {
                self.failed = true;
                return Some(Err(CompressionError::OddLength { len: self.offset }));
            };
            self.offset += 1;

            match RunRecord::from_bytes(count, value, record_offset) {
                Ok(record) => {
                    self.remaining = record.count;
                    self.value = record.value;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        self.remaining -= 1;
        Some(Ok(self.value))
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for RunLengthDecoder<I> where I: FusedIterator {}

/// Encode `input` into records, two bytes each.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    compress_into(input, &mut out);
    out
}

fn compress_into(input: &[u8], out: &mut Vec<u8>) {
    for record in RunLengthEncoder::new(input.iter().copied()) {
        out.extend_from_slice(&record.to_bytes());
    }
}

/// Decode a whole record stream. Odd input is rejected before any output.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(input.len());
    decompress_into(input, &mut out)?;
    Ok(out)
}

fn decompress_into(input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
    if input.len() % RECORD_LEN != 0 {
        return Err(CompressionError::OddLength { len: input.len() });
    }
    for (i, pair) in input.chunks_exact(RECORD_LEN).enumerate() {
        let record = RunRecord::from_bytes(pair[0], pair[1], i * RECORD_LEN)?;
        out.extend(std::iter::repeat(record.value).take(record.count as usize));
    }
    Ok(())
}

/// Stateless run-length codec.
///
/// Each chunk is encoded on its own: runs are never merged across
/// `compress_chunk` calls, and `finish` has nothing to flush.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunLengthCodec;

impl RunLengthCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for RunLengthCodec {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        compress_into(input, out);
        Ok(())
    }

    fn finish(&mut self, _out: &mut Vec<u8>) -> Result<(), CompressionError> {
        Ok(())
    }
}

impl Decompressor for RunLengthCodec {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        decompress_into(input, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_splits_at_cap() {
        let records: Vec<RunRecord> = RunLengthEncoder::new(std::iter::repeat(7u8).take(300)).collect();
        assert_eq!(
            records,
            vec![RunRecord { count: 255, value: 7 }, RunRecord { count: 45, value: 7 }]
        );
    }

    #[test]
    fn decoder_stops_after_error() {
        let mut dec = RunLengthDecoder::new([1u8, 4, 9].into_iter());
        assert_eq!(dec.next(), Some(Ok(4)));
        assert_eq!(dec.next(), Some(Err(CompressionError::OddLength { len: 3 })));
        assert_eq!(dec.next(), None);
    }

    #[test]
    fn decoder_rejects_zero_count() {
        let mut dec = RunLengthDecoder::new([2u8, 1, 0, 5].into_iter());
        assert_eq!(dec.next(), Some(Ok(1)));
        assert_eq!(dec.next(), Some(Ok(1)));
        assert_eq!(dec.next(), Some(Err(CompressionError::ZeroRunLength { offset: 2 })));
        assert_eq!(dec.next(), None);
    }
}
