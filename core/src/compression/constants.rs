// compression/constants.rs
//! Record layout of the run-length codec.

/// Longest run a single record can describe.
pub const MAX_RUN_LENGTH: u8 = u8::MAX;

/// Size of one `[count][value]` record on the wire.
pub const RECORD_LEN: usize = 2;
