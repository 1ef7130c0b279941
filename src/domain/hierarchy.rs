//! Parent links between address objects and the walk that turns a leaf record
//! into a full hierarchical address.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{AddressRecord, Catalog, ObjectId};

/// Separator placed between the segments of a [`FullAddress`].
pub const SEPARATOR: &str = ", ";

/// Mapping from child object id to parent object id.
///
/// A parent id of `0` marks the root of a chain and is stored as "no parent".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    parents: HashMap<ObjectId, ObjectId>,
}

impl Hierarchy {
    /// Records `parent` as the parent of `child`, replacing any earlier entry.
    pub fn insert(&mut self, child: ObjectId, parent: ObjectId) {
        self.parents.insert(child, parent);
    }

    /// Returns the parent of `child`, or `None` if it is a root.
    #[must_use]
    pub fn parent_of(&self, child: ObjectId) -> Option<ObjectId> {
        self.parents
            .get(&child)
            .copied()
            .filter(|&parent| parent != 0)
    }

    /// The number of child entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl FromIterator<(ObjectId, ObjectId)> for Hierarchy {
    fn from_iter<T: IntoIterator<Item = (ObjectId, ObjectId)>>(iter: T) -> Self {
        let mut hierarchy = Self::default();
        for (child, parent) in iter {
            hierarchy.insert(child, parent);
        }
        hierarchy
    }
}

/// Why a walk up the hierarchy stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The last record has no parent.
    Root,
    /// The last record points at a parent that is not in the catalog.
    MissingParent {
        /// The record whose parent is missing.
        child: ObjectId,
        /// The dangling parent id.
        parent: ObjectId,
    },
    /// The last record points back at a record already on the chain.
    Cycle {
        /// The record whose parent link closes the loop.
        child: ObjectId,
        /// The id that appeared twice.
        repeated: ObjectId,
    },
}

/// The records visited while walking from a leaf towards the root.
#[derive(Debug)]
pub struct Walk<'a> {
    /// Leaf first.
    chain: Vec<&'a AddressRecord>,
    termination: Termination,
}

impl<'a> Walk<'a> {
    /// Walks from `leaf` through its ancestors.
    ///
    /// Every record id is visited at most once, so the walk takes at most as
    /// many steps as there are distinct ids in the catalog.
    #[must_use]
    pub fn new(catalog: &'a Catalog, hierarchy: &Hierarchy, leaf: &'a AddressRecord) -> Self {
        let mut chain = vec![leaf];
        let mut visited = HashSet::from([leaf.object_id]);
        let mut current = leaf;

        let termination = loop {
            let Some(parent) = hierarchy.parent_of(current.object_id) else {
                break Termination::Root;
            };
            if !visited.insert(parent) {
                break Termination::Cycle {
                    child: current.object_id,
                    repeated: parent,
                };
            }
            let Some(next) = catalog.find_by_id(parent) else {
                break Termination::MissingParent {
                    child: current.object_id,
                    parent,
                };
            };
            chain.push(next);
            current = next;
        };

        Self { chain, termination }
    }

    /// The visited records, root first.
    pub fn root_first(&self) -> impl Iterator<Item = &'a AddressRecord> + '_ {
        self.chain.iter().rev().copied()
    }

    /// How the walk ended.
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    /// The number of records visited, the leaf included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// Errors raised while resolving a full address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No segments were accumulated for the record.
    #[error("no address segments accumulated for object {0}")]
    EmptyAddress(ObjectId),
}

/// A hierarchical address, root first, e.g. `city Springfield, street Main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct FullAddress {
    segments: Vec<String>,
}

impl FullAddress {
    /// Builds an address from the records of a walk.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyAddress`] if the walk produced no records.
    pub fn from_walk(leaf: ObjectId, walk: &Walk<'_>) -> Result<Self, ResolveError> {
        let segments: Vec<_> = walk.root_first().map(AddressRecord::short_form).collect();
        if segments.is_empty() {
            return Err(ResolveError::EmptyAddress(leaf));
        }
        Ok(Self { segments })
    }

    /// The short forms making up the address, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FullAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SEPARATOR))
    }
}

impl From<FullAddress> for String {
    fn from(address: FullAddress) -> Self {
        address.to_string()
    }
}

/// Resolves the full address of `leaf`.
///
/// A dangling parent link or a cycle does not fail the resolution: the walk
/// stops, a warning is logged, and the segments gathered so far are returned.
///
/// # Errors
///
/// Returns [`ResolveError::EmptyAddress`] if nothing could be accumulated.
pub fn resolve(
    catalog: &Catalog,
    hierarchy: &Hierarchy,
    leaf: &AddressRecord,
) -> Result<FullAddress, ResolveError> {
    let walk = Walk::new(catalog, hierarchy, leaf);

    match walk.termination() {
        Termination::Root => {
            debug!(object_id = leaf.object_id, depth = walk.depth(), "reached root");
        }
        Termination::MissingParent { child, parent } => warn!(
            object_id = leaf.object_id,
            "object {child} references parent {parent}, which is not in the address registry; \
             address truncated"
        ),
        Termination::Cycle { child, repeated } => warn!(
            object_id = leaf.object_id,
            "hierarchy cycle: object {child} points back to {repeated}; address truncated"
        ),
    }

    FullAddress::from_walk(leaf.object_id, &walk)
}
