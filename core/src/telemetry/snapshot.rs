// telemetry/snapshot.rs
//! Immutable view of a counter set plus derived ratios.
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub bytes_plain: u64,
    pub bytes_encoded: u64,
    pub records: u64,
    pub read_calls: u64,
    pub write_calls: u64,
    /// `bytes_encoded / bytes_plain`; 0 when nothing plain was seen.
    /// Run-length output can exceed the input, so this is not capped at 1.
    pub compression_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters) -> Self {
        let compression_ratio = if counters.bytes_plain > 0 {
            counters.bytes_encoded as f64 / counters.bytes_plain as f64
        } else {
            0.0
        };

        Self {
            bytes_plain: counters.bytes_plain,
            bytes_encoded: counters.bytes_encoded,
            records: counters.records,
            read_calls: counters.read_calls,
            write_calls: counters.write_calls,
            compression_ratio,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
