// compression/mod.rs
//! Run-length codec behind the `Compressor`/`Decompressor` traits.
//!
//! Notes:
//! - The codec is stateless per chunk; callers own chunk boundaries.
//! - Encoded data is a flat sequence of 2-byte `[count][value]` records.

pub mod codecs;
pub mod constants;
pub mod types;

pub use codecs::rle::{compress, decompress, RunLengthCodec, RunLengthDecoder, RunLengthEncoder};
pub use constants::*;
pub use types::*;
