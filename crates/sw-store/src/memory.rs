//! In-memory result store.
//!
//! Holds series that are already in memory.  Tests build one with
//! [`MemoryStoreBuilder`]; callers holding results from elsewhere can do the
//! same.

use std::collections::HashMap;

use sw_core::{EntityId, EntityKind, LinkAttribute, NodeAttribute, Timestamp};

use crate::store::{ResultStore, Series};
use crate::{StoreError, StoreResult};

/// Series per entity and attribute, for both entity kinds.
///
/// Do not construct directly; use [`MemoryStoreBuilder`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    nodes: HashMap<EntityId, HashMap<NodeAttribute, Series>>,
    links: HashMap<EntityId, HashMap<LinkAttribute, Series>>,
}

impl MemoryStore {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl ResultStore for MemoryStore {
    fn node_series(&mut self, id: &EntityId, attr: NodeAttribute) -> StoreResult<Series> {
        let by_attr = self.nodes.get(id).ok_or_else(|| StoreError::MissingEntity {
            kind: EntityKind::Node,
            id:   id.clone(),
        })?;
        by_attr.get(&attr).cloned().ok_or_else(|| StoreError::MissingParameter {
            kind: EntityKind::Node,
            name: attr.canonical_name().to_owned(),
        })
    }

    fn link_series(&mut self, id: &EntityId, attr: LinkAttribute) -> StoreResult<Series> {
        let by_attr = self.links.get(id).ok_or_else(|| StoreError::MissingEntity {
            kind: EntityKind::Link,
            id:   id.clone(),
        })?;
        by_attr.get(&attr).cloned().ok_or_else(|| StoreError::MissingParameter {
            kind: EntityKind::Link,
            name: attr.canonical_name().to_owned(),
        })
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Incrementally assembles a [`MemoryStore`].
///
/// Adding a series for an id implicitly registers the entity.  Adding the
/// same (id, attribute) twice merges the points, later values winning.
#[derive(Default)]
pub struct MemoryStoreBuilder {
    store: MemoryStore,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node that has no recorded series.
    pub fn add_node(&mut self, id: impl Into<EntityId>) -> &mut Self {
        self.store.nodes.entry(id.into()).or_default();
        self
    }

    /// Register a link that has no recorded series.
    pub fn add_link(&mut self, id: impl Into<EntityId>) -> &mut Self {
        self.store.links.entry(id.into()).or_default();
        self
    }

    pub fn add_node_series<I>(&mut self, id: impl Into<EntityId>, attr: NodeAttribute, points: I) -> &mut Self
    where
        I: IntoIterator<Item = (Timestamp, f64)>,
    {
        self.store
            .nodes
            .entry(id.into())
            .or_default()
            .entry(attr)
            .or_default()
            .extend(points);
        self
    }

    pub fn add_link_series<I>(&mut self, id: impl Into<EntityId>, attr: LinkAttribute, points: I) -> &mut Self
    where
        I: IntoIterator<Item = (Timestamp, f64)>,
    {
        self.store
            .links
            .entry(id.into())
            .or_default()
            .entry(attr)
            .or_default()
            .extend(points);
        self
    }

    pub fn build(&mut self) -> MemoryStore {
        std::mem::take(&mut self.store)
    }
}
