// transform/capability.rs
//! Capability-tagged byte-stream contract.
//!
//! A stream advertises what it can do through `Capabilities`; every operation
//! it does not offer returns `StreamError::Unsupported` instead of silently
//! doing nothing. Callers may check `can_read`/`can_write` up front or just
//! handle the error.
use std::io::SeekFrom;

use crate::types::{Operation, Result, StreamError};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        const READ  = 0b0000_0001;
        const WRITE = 0b0000_0010;
        const SEEK  = 0b0000_0100;
    }
}

/// Slice `buffer[offset..offset + count]`, or `InvalidRange`.
#[inline]
pub fn checked_range(len: usize, offset: usize, count: usize) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(StreamError::InvalidRange { offset, count, len }),
    }
}

pub trait ByteStream {
    /// Short name used in error messages.
    const NAME: &'static str;

    fn capabilities(&self) -> Capabilities;

    fn can_read(&self) -> bool {
        self.capabilities().contains(Capabilities::READ)
    }

    fn can_write(&self) -> bool {
        self.capabilities().contains(Capabilities::WRITE)
    }

    fn can_seek(&self) -> bool {
        self.capabilities().contains(Capabilities::SEEK)
    }

    /// Fill up to `buf.len()` bytes; 0 means end of data.
    fn read_bytes(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(StreamError::unsupported(Operation::Read, Self::NAME))
    }

    /// Accept all of `buf` or fail.
    fn write_bytes(&mut self, _buf: &[u8]) -> Result<()> {
        Err(StreamError::unsupported(Operation::Write, Self::NAME))
    }

    fn seek_to(&mut self, _pos: SeekFrom) -> Result<u64> {
        Err(StreamError::unsupported(Operation::Seek, Self::NAME))
    }

    fn length(&self) -> Result<u64> {
        Err(StreamError::unsupported(Operation::Length, Self::NAME))
    }

    /// Unsupported unless the stream keeps output pending. To flush a wrapped
    /// sink, take it back with `into_inner`.
    fn flush_bytes(&mut self) -> Result<()> {
        Err(StreamError::unsupported(Operation::Flush, Self::NAME))
    }

    /// `read(buffer, offset, max_count)` form of `read_bytes`.
    fn read_at(&mut self, buffer: &mut [u8], offset: usize, count: usize) -> Result<usize> {
        let range = checked_range(buffer.len(), offset, count)?;
        self.read_bytes(&mut buffer[range])
    }

    /// `write(buffer, offset, count)` form of `write_bytes`.
    fn write_at(&mut self, buffer: &[u8], offset: usize, count: usize) -> Result<()> {
        let range = checked_range(buffer.len(), offset, count)?;
        self.write_bytes(&buffer[range])
    }
}
