//! Address Registry Queries
//!
//! Address objects and their administrative hierarchy are read from two XML
//! registry files. Records can be listed by validity date, or resolved to full
//! hierarchical addresses by walking their parent links.

pub mod domain;
pub use domain::{AddressRecord, Catalog, Config, FullAddress, Hierarchy, ObjectId};

/// The date-range and full-address queries.
pub mod query;

/// Registry loading.
pub mod storage;
pub use storage::{LoadError, MemorySource, RecordSource, XmlSource};
