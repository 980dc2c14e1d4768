// transform/compressing.rs
//! Run-length transform exposed as a one-directional byte stream.
//!
//! A stream is built either over a source (`CompressingStream::reader`, reads
//! return decompressed bytes) or over a sink (`CompressingStream::writer`,
//! writes are compressed before reaching the sink). The opposite direction,
//! seek, length and flush all fail with `StreamError::Unsupported`.
//!
//! Write path: every write call is compressed on its own. Two writes of the
//! same byte produce two records, never one merged run.
use std::collections::VecDeque;
use std::io::{self, Read, Seek, SeekFrom, Write};

use bytes::BytesMut;
use log::{debug, trace, warn};

use crate::compression::constants::RECORD_LEN;
use crate::compression::{CompressionError, Compressor, Decompressor, RunLengthCodec};
use crate::config::StreamConfig;
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot};
use crate::transform::capability::{ByteStream, Capabilities};
use crate::types::{Operation, Result, StreamError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Reads decompress from the wrapped source.
    Read,
    /// Writes compress into the wrapped sink.
    Write,
}

/// Wrapped side of a `CompressingStream`: a readable source or a writable sink.
pub trait Endpoint {
    type Inner;

    fn mode(&self) -> StreamMode;
    fn reader(&mut self) -> Option<&mut dyn Read>;
    fn writer(&mut self) -> Option<&mut dyn Write>;
    fn get_ref(&self) -> &Self::Inner;
    fn into_inner(self) -> Self::Inner;
}

#[derive(Debug)]
pub struct Source<R>(R);

#[derive(Debug)]
pub struct Sink<W>(W);

impl<R: Read> Endpoint for Source<R> {
    type Inner = R;

    fn mode(&self) -> StreamMode {
        StreamMode::Read
    }
    fn reader(&mut self) -> Option<&mut dyn Read> {
        Some(&mut self.0)
    }
    fn writer(&mut self) -> Option<&mut dyn Write> {
        None
    }
    fn get_ref(&self) -> &R {
        &self.0
    }
    fn into_inner(self) -> R {
        self.0
    }
}

impl<W: Write> Endpoint for Sink<W> {
    type Inner = W;

    fn mode(&self) -> StreamMode {
        StreamMode::Write
    }
    fn reader(&mut self) -> Option<&mut dyn Read> {
        None
    }
    fn writer(&mut self) -> Option<&mut dyn Write> {
        Some(&mut self.0)
    }
    fn get_ref(&self) -> &W {
        &self.0
    }
    fn into_inner(self) -> W {
        self.0
    }
}

pub struct CompressingStream<E: Endpoint> {
    inner: E,
    codec: RunLengthCodec,
    /// Pulled record bytes not yet forming a whole record.
    pending: BytesMut,
    /// Decoded bytes waiting for the caller.
    decoded: VecDeque<u8>,
    /// Pull buffer (read mode) or encode buffer (write mode).
    scratch: Vec<u8>,
    eof: bool,
    poisoned: bool,
    counters: TelemetryCounters,
}

impl<R: Read> CompressingStream<Source<R>> {
    /// Decompressing stream over `source` with the default config.
    pub fn reader(source: R) -> Self {
        Self::build(Source(source), StreamConfig::default())
    }

    pub fn reader_with_config(source: R, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(Source(source), config))
    }
}

impl<W: Write> CompressingStream<Sink<W>> {
    /// Compressing stream into `sink`.
    pub fn writer(sink: W) -> Self {
        Self::build(Sink(sink), StreamConfig::default())
    }

    pub fn writer_with_config(sink: W, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(Sink(sink), config))
    }
}

impl<E: Endpoint> CompressingStream<E> {
    fn build(inner: E, config: StreamConfig) -> Self {
        let scratch = match inner.mode() {
            StreamMode::Read => vec![0u8; config.buffer_size],
            StreamMode::Write => Vec::new(),
        };
        Self {
            inner,
            codec: RunLengthCodec::new(),
            pending: BytesMut::with_capacity(RECORD_LEN),
            decoded: VecDeque::new(),
            scratch,
            eof: false,
            poisoned: false,
            counters: TelemetryCounters::default(),
        }
    }

    pub fn mode(&self) -> StreamMode {
        self.inner.mode()
    }

    pub fn get_ref(&self) -> &E::Inner {
        self.inner.get_ref()
    }

    /// Give back the wrapped source/sink. Buffered decoded bytes are dropped.
    pub fn into_inner(self) -> E::Inner {
        self.inner.into_inner()
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    /// Run `op`, marking the stream unusable if it fails.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.poisoned {
            return Err(StreamError::Poisoned);
        }
        let result = op(self);
        if let Err(e) = &result {
            if e.poisons() {
                warn!("compressing stream failed: {e}");
                self.poisoned = true;
            }
        }
        result
    }

    /// Pull one chunk from the source and decode every whole record in it.
    fn fill(&mut self) -> Result<()> {
        let Some(source) = self.inner.reader() else {
            return Err(StreamError::unsupported(Operation::Read, Self::NAME));
        };
        let n = loop {
            match source.read(&mut self.scratch) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        if n == 0 {
            debug!("compressed source exhausted ({} record bytes pulled)", self.counters.bytes_encoded);
            self.eof = true;
            return Ok(());
        }
        self.counters.add_encoded(n);
        self.pending.extend_from_slice(&self.scratch[..n]);

        let whole = self.pending.len() - self.pending.len() % RECORD_LEN;
        if whole == 0 {
            return Ok(());
        }
        let records = self.pending.split_to(whole);
        let mut out = Vec::with_capacity(whole);
        self.codec.decompress_chunk(&records, &mut out)?;
        self.counters.add_records(whole / RECORD_LEN);
        self.decoded.extend(out);
        Ok(())
    }

    fn read_decoded(&mut self, buf: &mut [u8]) -> Result<usize> {
        while self.decoded.len() < buf.len() && !self.eof {
            self.fill()?;
        }
        if self.decoded.len() < buf.len() && !self.pending.is_empty() {
            return Err(CompressionError::OddLength { len: self.counters.bytes_encoded as usize }.into());
        }

        let n = buf.len().min(self.decoded.len());
        for (dst, src) in buf.iter_mut().zip(self.decoded.drain(..n)) {
            *dst = src;
        }
        self.counters.add_read(n);
        trace!("compressing stream read {n} of {} requested", buf.len());
        Ok(n)
    }

    fn write_encoded(&mut self, buf: &[u8]) -> Result<()> {
        self.scratch.clear();
        self.codec.compress_chunk(buf, &mut self.scratch)?;

        let Some(sink) = self.inner.writer() else {
            return Err(StreamError::unsupported(Operation::Write, Self::NAME));
        };
        sink.write_all(&self.scratch)?;
        self.counters.add_write(buf.len(), self.scratch.len());
        trace!("compressing stream wrote {} bytes as {} record bytes", buf.len(), self.scratch.len());
        Ok(())
    }
}

impl<E: Endpoint> ByteStream for CompressingStream<E> {
    const NAME: &'static str = "compressing stream";

    fn capabilities(&self) -> Capabilities {
        match self.mode() {
            StreamMode::Read => Capabilities::READ,
            StreamMode::Write => Capabilities::WRITE,
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.can_read() {
            return Err(StreamError::unsupported(Operation::Read, Self::NAME));
        }
        if buf.is_empty() {
            return Ok(0);
        }
        self.guarded(|s| s.read_decoded(buf))
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        if !self.can_write() {
            return Err(StreamError::unsupported(Operation::Write, Self::NAME));
        }
        self.guarded(|s| s.write_encoded(buf))
    }
}

impl<E: Endpoint> Read for CompressingStream<E> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_bytes(buf)?)
    }
}

impl<E: Endpoint> Write for CompressingStream<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    /// Returns `Unsupported` from the `ByteStream::flush_bytes` default.
    fn flush(&mut self) -> io::Result<()> {
        Ok(self.flush_bytes()?)
    }
}

impl<E: Endpoint> Seek for CompressingStream<E> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}
