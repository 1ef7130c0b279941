//! In-memory collection of address records.
//!
//! The [`Catalog`] knows nothing about XML or the filesystem. It is built once
//! from the records produced by a [`RecordSource`](crate::storage::RecordSource)
//! and is read-only afterwards.

use std::{
    collections::{HashMap, HashSet},
    hash::BuildHasher,
};

use chrono::NaiveDate;

use crate::domain::{AddressRecord, ObjectId};

/// The loaded address records, in load order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    records: Vec<AddressRecord>,

    /// Position of the first record carrying each id.
    index: HashMap<ObjectId, usize>,
}

impl Catalog {
    /// Builds a catalog from records in load order.
    ///
    /// Duplicate ids are kept; lookups resolve to the first occurrence.
    #[must_use]
    pub fn new(records: Vec<AddressRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index.entry(record.object_id).or_insert(position);
        }
        Self { records, index }
    }

    /// Returns the first record with the given id, if any.
    #[must_use]
    pub fn find_by_id(&self, id: ObjectId) -> Option<&AddressRecord> {
        self.index
            .get(&id)
            .and_then(|&position| self.records.get(position))
    }

    /// All records, in load order.
    #[must_use]
    pub fn all(&self) -> &[AddressRecord] {
        &self.records
    }

    /// The number of records, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records valid on `date` whose id is in `ids`, in load order.
    ///
    /// The active/current flags are not consulted.
    pub fn valid_on<'a, S: BuildHasher>(
        &'a self,
        date: NaiveDate,
        ids: &'a HashSet<ObjectId, S>,
    ) -> impl Iterator<Item = &'a AddressRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.is_valid_on(date) && ids.contains(&record.object_id))
    }

    /// Active, current records of the given type, in load order.
    pub fn select_current<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a AddressRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.type_name == type_name && record.is_current_and_active())
    }
}

impl FromIterator<AddressRecord> for Catalog {
    fn from_iter<T: IntoIterator<Item = AddressRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
