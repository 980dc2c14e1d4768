// telemetry/counters.rs
//! Mutable counters updated by the transforms on every call.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Byte and call counts collected by one transform instance.
///
/// For a `CompressingStream`, `bytes_plain` counts raw bytes on the caller's
/// side and `bytes_encoded` counts record bytes on the source/sink side. For a
/// `KeyedResourceReader`, `bytes_plain` counts value bytes returned and
/// `bytes_encoded` counts wire bytes consumed from the source.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub bytes_plain: u64,
    pub bytes_encoded: u64,
    pub records: u64,
    pub read_calls: u64,
    pub write_calls: u64,
}

impl TelemetryCounters {
    /// Record one read call that handed `returned` bytes to the caller.
    pub fn add_read(&mut self, returned: usize) {
        self.read_calls += 1;
        self.bytes_plain += returned as u64;
    }

    /// Record one write call: `plain_len` raw bytes became `encoded_len` record bytes.
    pub fn add_write(&mut self, plain_len: usize, encoded_len: usize) {
        self.write_calls += 1;
        self.bytes_plain += plain_len as u64;
        self.bytes_encoded += encoded_len as u64;
        self.records += (encoded_len / 2) as u64;
    }

    /// Record encoded bytes pulled from a source.
    pub fn add_encoded(&mut self, len: usize) {
        self.bytes_encoded += len as u64;
    }

    pub fn add_records(&mut self, n: usize) {
        self.records += n as u64;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.bytes_plain += other.bytes_plain;
        self.bytes_encoded += other.bytes_encoded;
        self.records += other.records;
        self.read_calls += other.read_calls;
        self.write_calls += other.write_calls;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
