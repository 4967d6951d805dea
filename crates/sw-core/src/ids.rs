//! Entity identifiers and entity kinds.
//!
//! SWMM names every node and link with a free-form string (`"J-101"`,
//! `"BC-BB-F3-18900"`).  The same string may name both a node and a link, so
//! an `EntityId` only means something together with its [`EntityKind`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ── EntityKind ────────────────────────────────────────────────────────────────

/// The two kinds of network element the toolkit extracts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Junctions, outfalls, storage units, dividers.
    Node,
    /// Conduits, pumps, orifices, weirs, outlets.
    Link,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Node, EntityKind::Link];

    /// Capitalised singular, used in chart titles and legends (`"Node"`).
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Node => "Node",
            EntityKind::Link => "Link",
        }
    }

    /// Lower-case plural, used in output file names (`"nodes"`).
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Node => "nodes",
            EntityKind::Link => "links",
        }
    }

    /// Lower-case singular, used as a file-name prefix (`"node"`).
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Node => "node",
            EntityKind::Link => "link",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

// ── EntityId ──────────────────────────────────────────────────────────────────

/// Name of a node or link as it appears in the SWMM model.
///
/// Ordered lexicographically, which is the order comparison tables use.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with characters that are unsafe in file names replaced by `_`.
    pub fn file_safe(&self) -> String {
        self.0
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
