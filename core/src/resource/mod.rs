// resource/mod.rs
//! Keyed resource wire format: encoding records and extracting one value by key.
//!
//! Responsibilities:
//! - Stuff/destuff `00` bytes and frame fields with `00 01`
//! - Locate a key in a forward-only source and stream its value
//!
//! Non-responsibilities:
//! - Indexing or random access
//! - Closing the source

pub mod encode;
pub mod reader;
pub mod window;

pub use encode::{encode_record, stuff, ResourceWriter};
pub use reader::{extract_value, KeyedResourceReader, ReaderState};
pub use window::KeyWindow;
