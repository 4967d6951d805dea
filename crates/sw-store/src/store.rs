//! The result-store query interface.
//!
//! # Pluggability
//!
//! Extraction calls the store through [`ResultStore`], so a caller can back
//! it with a binary result file ([`OutFile`][crate::OutFile]), in-memory
//! data ([`MemoryStore`][crate::MemoryStore]), or any other source of
//! recorded series.

use std::collections::BTreeMap;

use sw_core::{Attribute, EntityId, LinkAttribute, NodeAttribute, Timestamp};

use crate::StoreResult;

/// Recorded values of one (entity, parameter) pair, keyed by timestamp.
pub type Series = BTreeMap<Timestamp, f64>;

/// A completed simulation's recorded results.
///
/// Methods take `&mut self` because file-backed stores seek a shared
/// handle; every query reads its series to completion before returning.
pub trait ResultStore {
    /// Full recorded series of `attr` for node `id`.
    ///
    /// Fails with `MissingEntity` when the store has no such node.
    fn node_series(&mut self, id: &EntityId, attr: NodeAttribute) -> StoreResult<Series>;

    /// Full recorded series of `attr` for link `id`.
    fn link_series(&mut self, id: &EntityId, attr: LinkAttribute) -> StoreResult<Series>;

    /// Dispatch on the attribute's entity kind.
    fn series(&mut self, id: &EntityId, attr: Attribute) -> StoreResult<Series> {
        match attr {
            Attribute::Node(a) => self.node_series(id, a),
            Attribute::Link(a) => self.link_series(id, a),
        }
    }
}

impl<S: ResultStore + ?Sized> ResultStore for Box<S> {
    fn node_series(&mut self, id: &EntityId, attr: NodeAttribute) -> StoreResult<Series> {
        (**self).node_series(id, attr)
    }

    fn link_series(&mut self, id: &EntityId, attr: LinkAttribute) -> StoreResult<Series> {
        (**self).link_series(id, attr)
    }
}
