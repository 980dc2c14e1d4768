// resource/encode.rs
//! Writing side of the resource wire format.
//!
//! ```text
//! ASCII(key) || 00 01 || stuffed(value) || 00 01
//! ```
//! `stuffed` doubles every `00`, so the only `00` not followed by `00` on the
//! wire is the start of a separator.
use std::io::Write;

use crate::constants::{ESCAPE, ESCAPED_ZERO, SEPARATOR};
use crate::types::{Result, StreamError};

/// Keys must be non-empty ASCII.
pub fn validate_key(key: &str) -> Result<&[u8]> {
    if key.is_empty() {
        return Err(StreamError::InvalidKey("key is empty".into()));
    }
    if !key.is_ascii() {
        return Err(StreamError::InvalidKey(format!("key {key:?} is not ASCII")));
    }
    Ok(key.as_bytes())
}

/// Append `bytes` to `out`, doubling every `00`.
pub fn stuff_into(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        if b == ESCAPE {
            out.extend_from_slice(&ESCAPED_ZERO);
        } else {
            out.push(b);
        }
    }
}

pub fn stuff(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    stuff_into(bytes, &mut out);
    out
}

/// Encode one `key -> value` record.
pub fn encode_record(key: &str, value: &[u8]) -> Result<Vec<u8>> {
    let key = validate_key(key)?;
    let mut out = Vec::with_capacity(key.len() + value.len() + 2 * SEPARATOR.len());
    stuff_into(key, &mut out);
    out.extend_from_slice(&SEPARATOR);
    stuff_into(value, &mut out);
    out.extend_from_slice(&SEPARATOR);
    Ok(out)
}

/// Appends records to a sink. The sink stays owned by the caller via `into_inner`.
pub struct ResourceWriter<W: Write> {
    out: W,
    records: u64,
}

impl<W: Write> ResourceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, records: 0 }
    }

    pub fn write_record(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let record = encode_record(key, value)?;
        self.out.write_all(&record)?;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
