//! Loading of address registries.
//!
//! Queries never read files themselves; they are handed a [`RecordSource`].

mod memory;
mod source;
/// XML registry decoding.
pub mod xml;

pub use memory::MemorySource;
pub use source::RecordSource;
pub use xml::{LoadError, XmlSource};
