//! Writing runs and comparisons to disk, and reading runs back.
//!
//! Nothing here runs until the data it writes is complete in memory, so a
//! failed extraction or comparison never leaves a partial CSV behind.

use std::path::PathBuf;

use log::{debug, info};

use sw_core::{EntityKind, PipelineConfig};
use sw_output::layout::ensure_dir;
use sw_output::{ComparisonChart, CsvWriter, OutputLayout, load_entity_csv, render_comparison_chart, render_run_chart};

use crate::compare::ComparisonSet;
use crate::extract::RunResult;
use crate::{PipelineError, PipelineResult};

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct Persistence {
    layout:   OutputLayout,
    writer:   CsvWriter,
    save_csv: bool,
    plot:     bool,
}

impl Persistence {
    pub fn new(layout: OutputLayout, round_decimals: u32, save_csv: bool, plot: bool) -> Self {
        Self { layout, writer: CsvWriter::new(round_decimals), save_csv, plot }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(OutputLayout::from_config(config), config.round_decimals, config.save_csv, config.plot)
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Write the run's CSVs (if `save_csv`) and one chart per parameter
    /// per kind (if `plot`).  Returns the files written.
    pub fn write_run(&self, run: &RunResult) -> PipelineResult<Vec<PathBuf>> {
        ensure_dir(self.layout.project_dir())?;
        let mut written = Vec::new();

        if self.save_csv {
            for kind in EntityKind::ALL {
                let path = self.layout.table_csv(&run.name, kind);
                self.writer.write_entity_csv(&path, run.table(kind))?;
                info!("saved {} data for {} to {}", kind.plural(), run.name, path.display());
                written.push(path);
            }
        }

        if self.plot {
            for kind in EntityKind::ALL {
                let table = run.table(kind);
                for param in table.columns() {
                    let path = self.layout.run_plot(&run.name, kind, param);
                    render_run_chart(&path, table, param)?;
                    debug!("plotted {} {param} for {} to {}", kind.plural(), run.name, path.display());
                    written.push(path);
                }
            }
        }
        Ok(written)
    }

    /// The four CSVs a comparison of `run1` and `run2` reads.
    pub fn comparison_inputs(&self, run1: &str, run2: &str) -> [PathBuf; 4] {
        [
            self.layout.table_csv(run1, EntityKind::Node),
            self.layout.table_csv(run1, EntityKind::Link),
            self.layout.table_csv(run2, EntityKind::Node),
            self.layout.table_csv(run2, EntityKind::Link),
        ]
    }

    /// Fail with one `MissingInputFile` listing every absent input.
    pub fn check_inputs(&self, run1: &str, run2: &str) -> PipelineResult<()> {
        let missing: Vec<PathBuf> = self
            .comparison_inputs(run1, run2)
            .into_iter()
            .filter(|p| !p.is_file())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::MissingInputFile { files: missing })
        }
    }

    /// Load a previously written run.
    pub fn load_run(&self, run: &str) -> PipelineResult<RunResult> {
        let nodes = load_entity_csv(&self.layout.table_csv(run, EntityKind::Node), EntityKind::Node)?;
        let links = load_entity_csv(&self.layout.table_csv(run, EntityKind::Link), EntityKind::Link)?;
        debug!("loaded {run}: {} node rows, {} link rows", nodes.len(), links.len());
        Ok(RunResult { name: run.to_owned(), nodes, links })
    }

    /// Write every comparison CSV, and per-entity charts if `plot`.
    ///
    /// Comparison CSVs are written regardless of `save_csv`.
    pub fn write_comparison(&self, run1: &str, run2: &str, set: &ComparisonSet) -> PipelineResult<Vec<PathBuf>> {
        ensure_dir(&self.layout.comparison_dir(run1, run2))?;
        let mut written = Vec::new();

        for table in set.tables() {
            let (kind, param) = (table.kind(), table.parameter());
            let path = self.layout.comparison_csv(run1, run2, kind, param, set.compared_for_both(param));
            self.writer.write_comparison_csv(&path, table)?;
            info!("saved {kind} {param} comparison ({} rows) to {}", table.len(), path.display());
            written.push(path);

            if !self.plot {
                continue;
            }
            for id in table.ids() {
                let path = self.layout.comparison_plot(run1, run2, kind, id, param);
                let chart = ComparisonChart {
                    kind,
                    id,
                    parameter: param,
                    rows: table.rows_for(id),
                    run1,
                    run2,
                };
                render_comparison_chart(&path, &chart)?;
                debug!("plotted {kind} {id} {param} comparison to {}", path.display());
                written.push(path);
            }
        }
        Ok(written)
    }
}
