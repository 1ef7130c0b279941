//! Domain models for address registry queries.
//!
//! This module contains the address records, the in-memory catalog, the
//! parent hierarchy and the walk that builds full addresses from it. None of
//! it touches the filesystem.

/// Address records.
pub mod address;
pub use address::{AddressRecord, ObjectId};

mod catalog;
pub use catalog::Catalog;

mod config;
pub use config::{Config, CONFIG_FILE};

/// Parent links and full address resolution.
pub mod hierarchy;
pub use hierarchy::{FullAddress, Hierarchy, ResolveError, Termination, Walk};

/// Decoding of query arguments.
pub mod input;
pub use input::{parse_object_ids, parse_target_date, FormatError};
