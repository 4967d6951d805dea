//! Per-parameter comparison of two runs.

use sw_core::{EntityId, EntityKind, Timestamp};

/// One `(id, time)` key present in both runs, with both values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub id:   EntityId,
    pub time: Timestamp,
    pub sim1: f64,
    pub sim2: f64,
}

/// Joined values of one parameter from two runs.
///
/// Rows are kept sorted by id, then time.  Both value columns are plain
/// `f64`: a key missing from either run never becomes a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    kind:      EntityKind,
    parameter: String,
    rows:      Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Build a table, sorting `rows` by `(id, time)`.
    pub fn new(kind: EntityKind, parameter: impl Into<String>, mut rows: Vec<ComparisonRow>) -> Self {
        rows.sort_by(|a, b| a.id.cmp(&b.id).then(a.time.cmp(&b.time)));
        Self { kind, parameter: parameter.into(), rows }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `id, time, <param>_sim1, <param>_sim2`.
    pub fn headers(&self) -> [String; 4] {
        [
            "id".to_owned(),
            "time".to_owned(),
            format!("{}_sim1", self.parameter),
            format!("{}_sim2", self.parameter),
        ]
    }

    /// Distinct ids in ascending order.
    pub fn ids(&self) -> Vec<&EntityId> {
        let mut ids: Vec<&EntityId> = self.rows.iter().map(|r| &r.id).collect();
        ids.dedup();
        ids
    }

    /// The contiguous, time-ordered rows of one entity.
    pub fn rows_for(&self, id: &EntityId) -> &[ComparisonRow] {
        let start = self.rows.partition_point(|r| &r.id < id);
        let end = self.rows.partition_point(|r| &r.id <= id);
        &self.rows[start..end]
    }
}
