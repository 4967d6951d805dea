//! Deterministic artifact paths.
//!
//! ```text
//! <output_dir>/<project>/
//!     <run> - nodes data.csv
//!     <run> - links data.csv
//!     <run> - nodes <param> plot.svg
//!     comparisons/<run1> - VS - <run2>/
//!         <param> comparison.csv
//!         node_<id>_<param>_comparison.svg
//! ```
//!
//! When one parameter name is compared for both kinds, the comparison CSV
//! names gain a kind prefix (`nodes depth comparison.csv`) so neither
//! overwrites the other.

use std::fs;
use std::path::{Path, PathBuf};

use sw_core::{EntityId, EntityKind, PipelineConfig};

use crate::OutputResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    project_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(output_dir: impl AsRef<Path>, project_name: &str) -> Self {
        Self { project_dir: output_dir.as_ref().join(project_name) }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self { project_dir: config.project_dir() }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// `<run> - nodes data.csv` / `<run> - links data.csv`.
    pub fn table_csv(&self, run: &str, kind: EntityKind) -> PathBuf {
        self.project_dir.join(format!("{run} - {} data.csv", kind.plural()))
    }

    pub fn run_plot(&self, run: &str, kind: EntityKind, parameter: &str) -> PathBuf {
        self.project_dir.join(format!("{run} - {} {parameter} plot.svg", kind.plural()))
    }

    pub fn comparison_dir(&self, run1: &str, run2: &str) -> PathBuf {
        self.project_dir.join("comparisons").join(format!("{run1} - VS - {run2}"))
    }

    /// `kind_prefix` is set when `parameter` is compared for both kinds.
    pub fn comparison_csv(
        &self,
        run1: &str,
        run2: &str,
        kind: EntityKind,
        parameter: &str,
        kind_prefix: bool,
    ) -> PathBuf {
        let name = if kind_prefix {
            format!("{} {parameter} comparison.csv", kind.plural())
        } else {
            format!("{parameter} comparison.csv")
        };
        self.comparison_dir(run1, run2).join(name)
    }

    pub fn comparison_plot(
        &self,
        run1: &str,
        run2: &str,
        kind: EntityKind,
        id: &EntityId,
        parameter: &str,
    ) -> PathBuf {
        self.comparison_dir(run1, run2)
            .join(format!("{}_{}_{parameter}_comparison.svg", kind.singular(), id.file_safe()))
    }
}

/// Create `dir` and its parents.  Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> OutputResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
