//! transform-core
//!
//! Forward-only byte-stream transforms:
//! - a literal run-length codec and a read-or-write `CompressingStream` over it
//! - a `KeyedResourceReader` that pulls one value out of an escaped key/value stream
//!
//! Both wrap any `std::io` source or sink without owning its lifecycle.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

pub mod compression;
pub mod resource;
pub mod telemetry;
pub mod transform;

pub use types::{ErrorKind, Operation, ProtocolError, Result, StreamError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{compress, decompress, RunLengthCodec};
    pub use crate::config::StreamConfig;
    pub use crate::resource::{extract_value, KeyedResourceReader, ResourceWriter};
    pub use crate::transform::{ByteStream, Capabilities, CompressingStream, StreamMode};
    pub use crate::types::{ErrorKind, StreamError};
}
