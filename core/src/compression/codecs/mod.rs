// compression/codecs/mod.rs
//! Codec implementations behind the `Compressor`/`Decompressor` traits.

pub mod rle;

pub use rle::*;
