use crate::{
    domain::{AddressRecord, Hierarchy, ObjectId},
    storage::{LoadError, RecordSource},
};

/// A [`RecordSource`] backed by records already in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    records: Vec<AddressRecord>,
    hierarchy: Hierarchy,
}

impl MemorySource {
    /// Creates a source serving the given records and parent links.
    #[must_use]
    pub fn new(
        records: impl IntoIterator<Item = AddressRecord>,
        parents: impl IntoIterator<Item = (ObjectId, ObjectId)>,
    ) -> Self {
        Self {
            records: records.into_iter().collect(),
            hierarchy: parents.into_iter().collect(),
        }
    }
}

impl RecordSource for MemorySource {
    fn load_addresses(&self) -> Result<Vec<AddressRecord>, LoadError> {
        Ok(self.records.clone())
    }

    fn load_hierarchy(&self) -> Result<Hierarchy, LoadError> {
        Ok(self.hierarchy.clone())
    }
}
