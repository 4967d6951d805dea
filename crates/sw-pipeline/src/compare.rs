//! Comparison of two runs on `(id, time)`.
//!
//! # Join rule
//!
//! A row appears in the comparison of parameter `p` iff both runs hold a
//! non-missing value of `p` for the same entity at the same timestamp.
//! Keys present in only one run, or missing a value in either, are
//! dropped.  Values pass through unchanged.

use std::collections::HashMap;

use log::warn;

use sw_core::{EntityId, EntityKind, Timestamp};
use sw_table::{ComparisonRow, ComparisonTable, EntityTable};

use crate::extract::RunResult;
use crate::{PipelineError, PipelineResult};

/// Per-parameter comparison tables of two runs.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    pub nodes: Vec<ComparisonTable>,
    pub links: Vec<ComparisonTable>,
}

impl ComparisonSet {
    /// Node tables, then link tables, each in requested parameter order.
    pub fn tables(&self) -> impl Iterator<Item = &ComparisonTable> {
        self.nodes.iter().chain(self.links.iter())
    }

    /// `true` when `parameter` was compared for both kinds.
    pub fn compared_for_both(&self, parameter: &str) -> bool {
        self.nodes.iter().any(|t| t.parameter() == parameter) && self.links.iter().any(|t| t.parameter() == parameter)
    }
}

/// Compare every requested parameter of `run1` against `run2`.
pub fn compare(
    run1:        &RunResult,
    run2:        &RunResult,
    node_params: &[String],
    link_params: &[String],
) -> PipelineResult<ComparisonSet> {
    let compare_kind = |kind: EntityKind, params: &[String]| -> PipelineResult<Vec<ComparisonTable>> {
        params
            .iter()
            .map(|p| -> PipelineResult<ComparisonTable> {
                let table = compare_tables(run1.table(kind), run2.table(kind), p)?;
                if table.is_empty() {
                    warn!("{kind} {p}: {} and {} share no values", run1.name, run2.name);
                }
                Ok(table)
            })
            .collect()
    };

    Ok(ComparisonSet {
        nodes: compare_kind(EntityKind::Node, node_params)?,
        links: compare_kind(EntityKind::Link, link_params)?,
    })
}

/// Inner join of one parameter column of two same-kind tables.
///
/// Fails with `MissingParameter` when either table lacks the column.
pub fn compare_tables(sim1: &EntityTable, sim2: &EntityTable, parameter: &str) -> PipelineResult<ComparisonTable> {
    let kind = sim1.kind();
    let missing = || PipelineError::MissingParameter { kind, name: parameter.to_owned() };
    let c1 = sim1.column_index(parameter).ok_or_else(missing)?;
    let c2 = sim2.column_index(parameter).ok_or_else(missing)?;

    let right: HashMap<(&EntityId, Timestamp), f64> = sim2.present(c2).map(|(id, t, v)| ((id, t), v)).collect();

    let rows = sim1
        .present(c1)
        .filter_map(|(id, time, v1)| {
            right.get(&(id, time)).map(|&v2| ComparisonRow { id: id.clone(), time, sim1: v1, sim2: v2 })
        })
        .collect();

    Ok(ComparisonTable::new(kind, parameter, rows))
}
