// constants.rs
//! Resource wire constants and buffer sizing bounds.

/// Field terminator of the resource wire format.
pub const SEPARATOR: [u8; 2] = [0x00, 0x01];

/// A literal `0x00` inside a key or value, stuffed.
pub const ESCAPED_ZERO: [u8; 2] = [0x00, 0x00];

/// Escape lead byte of the resource wire format.
pub const ESCAPE: u8 = 0x00;

/// Defaults when `Option<usize>` is None.
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024; // 4 KiB
/// Smallest pull/buffer size we accept.
pub const MIN_BUFFER_SIZE: usize = 16;
/// Max buffer size sanity bound (32 MiB).
pub const MAX_BUFFER_SIZE: usize = 32 * 1024 * 1024;
