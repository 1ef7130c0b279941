//! The two registry queries.
//!
//! Both load their inputs from a [`RecordSource`] on every call and keep
//! nothing between calls.

use std::collections::HashSet;

use chrono::NaiveDate;
use nonempty::NonEmpty;
use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::{hierarchy, AddressRecord, Catalog, FullAddress, ObjectId, ResolveError},
    storage::{LoadError, RecordSource},
};

/// Returns every record valid on `date` whose id is one of `ids`, in source
/// order.
///
/// # Errors
///
/// Returns an error if the address records cannot be loaded.
#[instrument(skip(source, ids), fields(ids = ids.len()))]
pub fn date_range(
    source: &impl RecordSource,
    date: NaiveDate,
    ids: &NonEmpty<ObjectId>,
) -> Result<Vec<AddressRecord>, LoadError> {
    let catalog = Catalog::new(source.load_addresses()?);
    let ids: HashSet<ObjectId> = ids.iter().copied().collect();

    let matches: Vec<_> = catalog.valid_on(date, &ids).cloned().collect();
    tracing::debug!("{} of {} records matched", matches.len(), catalog.len());
    Ok(matches)
}

/// The outcome of resolving one selected record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// The leaf record the address was built for.
    pub object_id: ObjectId,
    /// The full address, or why it could not be built.
    #[serde(serialize_with = "serialize_outcome")]
    pub address: Result<FullAddress, ResolveError>,
}

fn serialize_outcome<S: serde::Serializer>(
    outcome: &Result<FullAddress, ResolveError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match outcome {
        Ok(address) => address.serialize(serializer),
        Err(_) => serializer.serialize_none(),
    }
}

/// Resolves the full address of every active, current record whose type is
/// `type_name`, in source order.
///
/// A record whose address cannot be built is reported in its [`Resolved`]
/// entry; the remaining records are still processed.
///
/// # Errors
///
/// Returns an error if the address records or the hierarchy cannot be loaded.
#[instrument(skip(source))]
pub fn full_addresses(
    source: &impl RecordSource,
    type_name: &str,
) -> Result<Vec<Resolved>, LoadError> {
    let catalog = Catalog::new(source.load_addresses()?);
    let hierarchy = source.load_hierarchy()?;

    Ok(catalog
        .select_current(type_name)
        .map(|record| Resolved {
            object_id: record.object_id,
            address: hierarchy::resolve(&catalog, &hierarchy, record),
        })
        .collect())
}
