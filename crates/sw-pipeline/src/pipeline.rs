//! The end-to-end runner.

use std::path::{Path, PathBuf};

use log::info;

use sw_core::{EntityKind, PipelineConfig, run_name};
use sw_store::{ResultStore, StoreResult};

use crate::compare::{ComparisonSet, compare};
use crate::extract::{RunResult, extract};
use crate::persist::Persistence;
use crate::PipelineResult;

/// Row count of one written comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub kind:      EntityKind,
    pub parameter: String,
    pub rows:      usize,
    pub entities:  usize,
}

/// What a [`Pipeline::run`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Run names extracted, in configuration order.
    pub runs:          Vec<String>,
    pub files_written: Vec<PathBuf>,
    pub comparisons:   Vec<ComparisonSummary>,
}

/// Extract every configured result file, then compare the configured pair.
///
/// # Example
///
/// ```rust,ignore
/// let config = PipelineConfig::from_json_path(Path::new("pipeline.json"))?;
/// let report = Pipeline::new(config).run(|path: &Path| OutFile::open(path))?;
/// ```
pub struct Pipeline {
    config:  PipelineConfig,
    persist: Persistence,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let persist = Persistence::from_config(&config);
        Self { config, persist }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage.  `open_store` is called once per result file.
    ///
    /// The first failure aborts the run.
    pub fn run<S, F>(&self, mut open_store: F) -> PipelineResult<PipelineReport>
    where
        S: ResultStore,
        F: FnMut(&Path) -> StoreResult<S>,
    {
        self.config.validate()?;
        let mut report = PipelineReport::default();

        for file in &self.config.result_files {
            let mut store = open_store(file)?;
            let run = self.extract_run(&mut store, &run_name(file))?;
            report.files_written.extend(self.persist.write_run(&run)?);
            report.runs.push(run.name);
        }

        if let Some([a, b]) = &self.config.compare {
            let (run1, run2) = (run_name(a), run_name(b));
            let set = self.compare_runs(&run1, &run2)?;
            report.files_written.extend(self.persist.write_comparison(&run1, &run2, &set)?);
            report.comparisons = set
                .tables()
                .map(|t| ComparisonSummary {
                    kind:      t.kind(),
                    parameter: t.parameter().to_owned(),
                    rows:      t.len(),
                    entities:  t.ids().len(),
                })
                .collect();
        }

        info!("{}: wrote {} files", self.config.project_name, report.files_written.len());
        Ok(report)
    }

    /// Extract the configured entities and parameters of one run.
    pub fn extract_run<S: ResultStore + ?Sized>(&self, store: &mut S, run: &str) -> PipelineResult<RunResult> {
        extract(
            store,
            run,
            &self.config.node_ids,
            &self.config.link_ids,
            &self.config.node_params,
            &self.config.link_params,
        )
    }

    /// Load two previously written runs and compare them.
    ///
    /// All four input CSVs are checked before any is read.
    pub fn compare_runs(&self, run1: &str, run2: &str) -> PipelineResult<ComparisonSet> {
        info!("comparing {run1} with {run2}");
        self.persist.check_inputs(run1, run2)?;
        let sim1 = self.persist.load_run(run1)?;
        let sim2 = self.persist.load_run(run2)?;
        compare(&sim1, &sim2, &self.config.node_params, &self.config.link_params)
    }
}
