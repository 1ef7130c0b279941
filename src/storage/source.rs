use crate::{
    domain::{AddressRecord, Hierarchy},
    storage::LoadError,
};

/// Something that can produce the address records and the hierarchy for one
/// query.
///
/// Each call is a one-shot read; implementations do not cache.
pub trait RecordSource {
    /// Loads all address records in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded. No partial
    /// result is returned.
    fn load_addresses(&self) -> Result<Vec<AddressRecord>, LoadError>;

    /// Loads the child to parent mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the hierarchy cannot be read or decoded.
    fn load_hierarchy(&self) -> Result<Hierarchy, LoadError>;
}
