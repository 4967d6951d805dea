//! Extraction: result store → one node table and one link table per run.

use log::{debug, info};

use sw_core::{EntityId, EntityKind, Parameter};
use sw_store::ResultStore;
use sw_table::{EntityTable, EntityTableBuilder};

use crate::PipelineResult;

/// Extracted results of one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Run name, see [`sw_core::run_name`].
    pub name:  String,
    pub nodes: EntityTable,
    pub links: EntityTable,
}

impl RunResult {
    pub fn table(&self, kind: EntityKind) -> &EntityTable {
        match kind {
            EntityKind::Node => &self.nodes,
            EntityKind::Link => &self.links,
        }
    }
}

/// Query `store` for every requested (entity, parameter) pair.
///
/// All parameter names are resolved before the first query, so an
/// unknown name fails without touching the store.  Any failure aborts the
/// whole extraction; no partial result is returned.
pub fn extract<S: ResultStore + ?Sized>(
    store:       &mut S,
    run_name:    &str,
    node_ids:    &[String],
    link_ids:    &[String],
    node_params: &[String],
    link_params: &[String],
) -> PipelineResult<RunResult> {
    let node_params = Parameter::resolve_all(EntityKind::Node, node_params)?;
    let link_params = Parameter::resolve_all(EntityKind::Link, link_params)?;

    info!(
        "extracting run {run_name}: {} nodes × {} parameters, {} links × {} parameters",
        node_ids.len(),
        node_params.len(),
        link_ids.len(),
        link_params.len()
    );

    let nodes = extract_kind(store, EntityKind::Node, node_ids, &node_params)?;
    let links = extract_kind(store, EntityKind::Link, link_ids, &link_params)?;

    Ok(RunResult { name: run_name.to_owned(), nodes, links })
}

fn extract_kind<S: ResultStore + ?Sized>(
    store:  &mut S,
    kind:   EntityKind,
    ids:    &[String],
    params: &[Parameter],
) -> PipelineResult<EntityTable> {
    let columns = params.iter().map(|p| p.name.clone()).collect();
    let mut builder = EntityTableBuilder::new(kind, columns);

    for id in ids {
        let id = EntityId::new(id.as_str());
        builder.add_entity(&id);
        for (column, param) in params.iter().enumerate() {
            let series = store.series(&id, param.attribute)?;
            debug!("{kind} {id} {param}: {} values", series.len());
            builder.add_series(&id, column, series)?;
        }
    }
    Ok(builder.build()?)
}
