//! Entity tables: one row per (entity, timestamp), one column per parameter.
//!
//! # Invariants
//!
//! - Every row has exactly one cell per parameter column.
//! - `(id, time)` is unique within a table; [`EntityTable::push`] rejects
//!   a second row with the same key.
//! - Missing values are `None`.  Non-finite values are stored as `None`.

use std::collections::{BTreeMap, HashMap, HashSet};

use sw_core::{EntityId, EntityKind, Timestamp};

use crate::{TableError, TableResult};

// ── TableRow ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id:     EntityId,
    pub time:   Timestamp,
    /// One cell per parameter column, in column order.
    pub values: Vec<Option<f64>>,
}

impl TableRow {
    pub fn new(id: impl Into<EntityId>, time: Timestamp, values: Vec<Option<f64>>) -> Self {
        Self { id: id.into(), time, values }
    }
}

// ── EntityTable ───────────────────────────────────────────────────────────────

/// Ordered rows for one entity kind of one run.
#[derive(Debug, Clone)]
pub struct EntityTable {
    kind:    EntityKind,
    columns: Vec<String>,
    rows:    Vec<TableRow>,
    keys:    HashSet<(EntityId, Timestamp)>,
}

impl EntityTable {
    /// An empty table with the given parameter columns (`id` and `time` are
    /// implicit).
    pub fn new(kind: EntityKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
            keys: HashSet::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Parameter column names, excluding `id` and `time`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, enforcing arity and key uniqueness.
    pub fn push(&mut self, mut row: TableRow) -> TableResult<()> {
        if row.values.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                got:      row.values.len(),
            });
        }
        if !self.keys.insert((row.id.clone(), row.time)) {
            return Err(TableError::DuplicateRow { id: row.id, time: row.time });
        }
        for cell in &mut row.values {
            if cell.is_some_and(|v| !v.is_finite()) {
                *cell = None;
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`column_index`][Self::column_index] but failing with
    /// `MissingColumn`.
    pub fn require_column(&self, name: &str) -> TableResult<usize> {
        self.column_index(name).ok_or_else(|| TableError::MissingColumn {
            kind:   self.kind,
            column: name.to_owned(),
        })
    }

    /// `(id, time, value)` for every row with a non-missing value in
    /// `column`, in row order.
    pub fn present(&self, column: usize) -> impl Iterator<Item = (&EntityId, Timestamp, f64)> + '_ {
        self.rows
            .iter()
            .filter_map(move |r| r.values.get(column).copied().flatten().map(|v| (&r.id, r.time, v)))
    }

    /// Distinct ids in first-seen order.
    pub fn ids(&self) -> Vec<&EntityId> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(&r.id))
            .map(|r| &r.id)
            .collect()
    }

    /// Non-missing `(time, value)` points of `column` for one entity, in
    /// ascending time order.
    pub fn points(&self, id: &EntityId, column: usize) -> Vec<(Timestamp, f64)> {
        let mut pts: Vec<(Timestamp, f64)> = self
            .rows
            .iter()
            .filter(|r| &r.id == id)
            .filter_map(|r| r.values.get(column).copied().flatten().map(|v| (r.time, v)))
            .collect();
        pts.sort_by_key(|&(t, _)| t);
        pts
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Folds per-(entity, parameter) series into an [`EntityTable`].
///
/// Series are merged by timestamp value, never by position: an entity
/// whose parameters were recorded on different grids gets a row for every
/// timestamp seen in any of them, with `None` where a parameter has no
/// value.  Rows come out grouped by entity in insertion order, then by
/// ascending time.
pub struct EntityTableBuilder {
    kind:     EntityKind,
    columns:  Vec<String>,
    entities: Vec<(EntityId, BTreeMap<Timestamp, Vec<Option<f64>>>)>,
    index:    HashMap<EntityId, usize>,
}

impl EntityTableBuilder {
    pub fn new(kind: EntityKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            entities: Vec::new(),
            index:    HashMap::new(),
        }
    }

    /// Register `id`, fixing its position in the output.  Idempotent.
    pub fn add_entity(&mut self, id: &EntityId) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.entities.len();
        self.entities.push((id.clone(), BTreeMap::new()));
        self.index.insert(id.clone(), i);
        i
    }

    /// Fill `column` of entity `id` from `points`.
    pub fn add_series<I>(&mut self, id: &EntityId, column: usize, points: I) -> TableResult<()>
    where
        I: IntoIterator<Item = (Timestamp, f64)>,
    {
        let width = self.columns.len();
        if column >= width {
            return Err(TableError::ColumnIndex { index: column, count: width });
        }
        let e = self.add_entity(id);
        let by_time = &mut self.entities[e].1;
        for (time, value) in points {
            by_time.entry(time).or_insert_with(|| vec![None; width])[column] = Some(value);
        }
        Ok(())
    }

    pub fn build(self) -> TableResult<EntityTable> {
        let mut table = EntityTable::new(self.kind, self.columns);
        for (id, by_time) in self.entities {
            for (time, values) in by_time {
                table.push(TableRow { id: id.clone(), time, values })?;
            }
        }
        Ok(table)
    }
}
