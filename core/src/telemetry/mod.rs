// telemetry/mod.rs
//! Per-instance counters and immutable snapshots.
//!
//! Counters are plain fields owned by one stream; a snapshot is taken when the
//! caller asks for it and can be serialized for logs.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
