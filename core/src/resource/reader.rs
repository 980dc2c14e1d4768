// resource/reader.rs
//! Extracts one value by key from a resource wire stream.
//!
//! State machine (monotonic):
//!
//! ```text
//! Seeking ──key matched──▶ KeyFound ──00 01 verified──▶ ReadingValue ──00 01──▶ Done
//!    │                        │                              │
//!    └── end of source:       └── anything else:             └── truncation / bad escape:
//!        KeyNotFound              ProtocolViolation              ProtocolViolation
//! ```
//! Any error moves the reader to `Failed`; later reads return `Poisoned`.
//!
//! Seeking slides a window the size of the key over every destuffed byte,
//! separators included as their two raw bytes, and stops at the first position
//! where the window equals the key. Field boundaries are not tracked, so a key
//! occurring inside a value or at the end of a longer key matches there.
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use log::{debug, trace, warn};

use crate::config::StreamConfig;
use crate::constants::{ESCAPE, SEPARATOR};
use crate::resource::encode::validate_key;
use crate::resource::window::KeyWindow;
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot};
use crate::transform::capability::{ByteStream, Capabilities};
use crate::types::{ProtocolError, Result, StreamError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Seeking,
    KeyFound,
    ReadingValue,
    Done,
    Failed,
}

/// One destuffed unit of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(u8),
    Separator,
    /// `00` followed by neither `00` nor `01`.
    InvalidEscape(u8),
    /// `00` as the very last byte of the source.
    DanglingEscape,
}

pub struct KeyedResourceReader<R: Read> {
    source: BufReader<R>,
    key: Box<[u8]>,
    window: KeyWindow,
    state: ReaderState,
    value_len: u64,
    counters: TelemetryCounters,
}

impl<R: Read> KeyedResourceReader<R> {
    pub fn new(source: R, key: &str) -> Result<Self> {
        Self::with_config(source, key, StreamConfig::default())
    }

    pub fn with_config(source: R, key: &str, config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let key: Box<[u8]> = validate_key(key)?.into();
        Ok(Self {
            source: BufReader::with_capacity(config.buffer_size, source),
            window: KeyWindow::new(key.len()),
            key,
            state: ReaderState::Seeking,
            value_len: 0,
            counters: TelemetryCounters::default(),
        })
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn key(&self) -> &str {
        // validated ASCII at construction
        std::str::from_utf8(&self.key).unwrap_or_default()
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    /// Give back the source. Bytes already buffered past the value are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    /// Read the remaining value bytes.
    pub fn read_value_to_end(&mut self) -> Result<Vec<u8>> {
        let mut value = Vec::new();
        let mut chunk = [0u8; 256];
        loop {
            let n = self.read_bytes(&mut chunk)?;
            if n == 0 {
                return Ok(value);
            }
            value.extend_from_slice(&chunk[..n]);
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let b = loop {
            match self.source.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => break buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        self.source.consume(1);
        self.counters.add_encoded(1);
        Ok(Some(b))
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let Some(b) = self.next_byte()? else {
            return Ok(None);
        };
        if b != ESCAPE {
            return Ok(Some(Token::Literal(b)));
        }
        let token = match self.next_byte()? {
            None => Token::DanglingEscape,
            Some(0x00) => Token::Literal(0x00),
            Some(0x01) => Token::Separator,
            Some(other) => Token::InvalidEscape(other),
        };
        Ok(Some(token))
    }

    fn seek_key(&mut self) -> Result<()> {
        loop {
            match self.next_token()? {
                Some(Token::Literal(b)) => {
                    if self.push_and_match(b) {
                        break;
                    }
                }
                Some(Token::Separator) => {
                    if SEPARATOR.iter().any(|&b| self.push_and_match(b)) {
                        break;
                    }
                }
                Some(Token::InvalidEscape(x)) => return Err(ProtocolError::InvalidEscape(x).into()),
                None | Some(Token::DanglingEscape) => {
                    debug!("source exhausted while seeking key {}", hex::encode(&self.key));
                    return Err(StreamError::KeyNotFound { key: self.key().to_owned() });
                }
            }
        }
        debug!(
            "key {} found after {} wire bytes",
            hex::encode(&self.key),
            self.counters.bytes_encoded
        );
        self.state = ReaderState::KeyFound;
        Ok(())
    }

    fn push_and_match(&mut self, b: u8) -> bool {
        self.window.push(b);
        self.window.matches(&self.key)
    }

    fn verify_separator(&mut self) -> Result<()> {
        let mut found = [0u8; 2];
        for slot in found.iter_mut() {
            *slot = self.next_byte()?.ok_or(ProtocolError::TruncatedSeparator)?;
        }
        if found != SEPARATOR {
            return Err(ProtocolError::MissingSeparator { found: found.to_vec() }.into());
        }
        self.state = ReaderState::ReadingValue;
        Ok(())
    }

    fn read_value(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut n = 0;
        while n < buf.len() {
            match self.next_token()? {
                Some(Token::Literal(b)) => {
                    buf[n] = b;
                    n += 1;
                }
                Some(Token::Separator) => {
                    self.state = ReaderState::Done;
                    self.counters.add_records(1);
                    debug!("value for key {} complete: {} bytes", hex::encode(&self.key), self.value_len + n as u64);
                    break;
                }
                Some(Token::InvalidEscape(x)) => return Err(ProtocolError::InvalidEscape(x).into()),
                None | Some(Token::DanglingEscape) => {
                    return Err(ProtocolError::TruncatedValue { read: self.value_len + n as u64 }.into());
                }
            }
        }
        self.value_len += n as u64;
        Ok(n)
    }

    fn step(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.state == ReaderState::Seeking {
            self.seek_key()?;
        }
        if self.state == ReaderState::KeyFound {
            self.verify_separator()?;
        }
        if self.state == ReaderState::Done {
            return Ok(0);
        }
        self.read_value(buf)
    }
}

impl<R: Read> ByteStream for KeyedResourceReader<R> {
    const NAME: &'static str = "keyed resource reader";

    fn capabilities(&self) -> Capabilities {
        Capabilities::READ
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.state {
            ReaderState::Failed => return Err(StreamError::Poisoned),
            ReaderState::Done => return Ok(0),
            _ if buf.is_empty() => return Ok(0),
            _ => {}
        }
        let result = self.step(buf);
        match &result {
            Ok(n) => {
                self.counters.add_read(*n);
                trace!("resource reader returned {n} of {} requested", buf.len());
            }
            Err(e) if e.poisons() => {
                warn!("resource reader for key {} failed: {e}", hex::encode(&self.key));
                self.state = ReaderState::Failed;
            }
            Err(_) => {}
        }
        result
    }

    /// Nothing is ever buffered for output.
    fn flush_bytes(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Read> Read for KeyedResourceReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_bytes(buf)?)
    }
}

impl<R: Read> Seek for KeyedResourceReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}

/// Pull the whole value stored under `key` out of `source`.
pub fn extract_value<R: Read>(source: R, key: &str) -> Result<Vec<u8>> {
    KeyedResourceReader::new(source, key)?.read_value_to_end()
}
