// transform/mod.rs
//! transform: byte-stream adapters over `std::io` sources and sinks.

pub mod capability;
pub mod compressing;

pub use capability::{ByteStream, Capabilities};
pub use compressing::{CompressingStream, Endpoint, Sink, Source, StreamMode};
