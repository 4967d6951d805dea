//! Pipeline configuration.
//!
//! Loaded from JSON by the application and passed by value into the
//! pipeline.  Every field that has a sensible default may be omitted:
//!
//! ```json
//! {
//!   "project_name": "Terminal F",
//!   "result_files": ["runs/Existing_100yr.out", "runs/Proposed_100yr.out"],
//!   "compare": ["runs/Existing_100yr.out", "runs/Proposed_100yr.out"],
//!   "node_ids": ["J-18900", "J-18890"],
//!   "link_ids": ["C-18100", "C-17300"],
//!   "node_params": ["head", "total_inflow"],
//!   "link_params": ["flow"]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, EntityKind, Parameter};

/// Largest rounding precision accepted; beyond this `f64` has no digits left.
pub const MAX_ROUND_DECIMALS: u32 = 15;

/// Everything the extraction and comparison pipeline needs to know.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sub-directory of `output_dir` all artifacts are written under.
    pub project_name: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Simulation result files to extract, one run each.
    pub result_files: Vec<PathBuf>,

    /// Pair of result files whose extracted CSVs are compared.  The files
    /// themselves are not reopened; only their run names are used.
    #[serde(default)]
    pub compare: Option<[PathBuf; 2]>,

    pub node_ids: Vec<String>,
    pub link_ids: Vec<String>,

    #[serde(default)]
    pub node_params: Vec<String>,
    #[serde(default)]
    pub link_params: Vec<String>,

    #[serde(default = "default_true")]
    pub save_csv: bool,

    /// Render extraction and comparison charts.
    #[serde(default = "default_true")]
    pub plot: bool,

    /// Decimal places kept when writing values to CSV.
    #[serde(default = "default_round_decimals")]
    pub round_decimals: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

fn default_round_decimals() -> u32 {
    6
}

impl PipelineConfig {
    /// A configuration with defaults for every optional field.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name:   project_name.into(),
            output_dir:     default_output_dir(),
            result_files:   Vec::new(),
            compare:        None,
            node_ids:       Vec::new(),
            link_ids:       Vec::new(),
            node_params:    Vec::new(),
            link_params:    Vec::new(),
            save_csv:       true,
            plot:           true,
            round_decimals: default_round_decimals(),
        }
    }

    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the configuration, reporting the first problem found.
    ///
    /// Parameter names are resolved here too, so an unknown parameter is
    /// reported before any file is opened.
    pub fn validate(&self) -> CoreResult<()> {
        if self.project_name.trim().is_empty() {
            return Err(CoreError::Config("project_name must not be empty".into()));
        }
        if self.result_files.is_empty() {
            return Err(CoreError::Config("result_files must list at least one file".into()));
        }
        let mut runs = HashSet::with_capacity(self.result_files.len());
        for file in &self.result_files {
            let run = run_name(file);
            if run.is_empty() {
                return Err(CoreError::Config(format!("{} has an empty run name", file.display())));
            }
            if !runs.insert(run) {
                return Err(CoreError::Config(format!(
                    "{} repeats the run name {:?} of another result file",
                    file.display(),
                    run_name(file)
                )));
            }
        }
        check_ids("node_ids", &self.node_ids)?;
        check_ids("link_ids", &self.link_ids)?;
        check_params(EntityKind::Node, &self.node_params)?;
        check_params(EntityKind::Link, &self.link_params)?;
        if self.round_decimals > MAX_ROUND_DECIMALS {
            return Err(CoreError::Config(format!(
                "round_decimals {} exceeds the maximum of {MAX_ROUND_DECIMALS}",
                self.round_decimals
            )));
        }
        if let Some([a, b]) = &self.compare {
            if run_name(a) == run_name(b) {
                return Err(CoreError::Config(format!(
                    "compared files {} and {} share the run name {:?}",
                    a.display(),
                    b.display(),
                    run_name(a)
                )));
            }
        }
        Ok(())
    }

    /// Directory holding one project's CSVs and charts.
    pub fn project_dir(&self) -> PathBuf {
        self.output_dir.join(&self.project_name)
    }
}

fn check_ids(field: &str, ids: &[String]) -> CoreResult<()> {
    if ids.is_empty() {
        return Err(CoreError::Config(format!("{field} must not be empty")));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if id.trim().is_empty() {
            return Err(CoreError::Config(format!("{field} contains an empty id")));
        }
        if !seen.insert(id.as_str()) {
            return Err(CoreError::Config(format!("{field} lists {id:?} more than once")));
        }
    }
    Ok(())
}

fn check_params(kind: EntityKind, names: &[String]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        Parameter::resolve(kind, name)?;
        if !seen.insert(name.as_str()) {
            return Err(CoreError::Config(format!("{kind} parameter {name:?} listed more than once")));
        }
    }
    Ok(())
}

/// Run name for a result file: the file name without directories (either
/// separator style) and without anything from the first `.` onwards.
///
/// `C:\models\Prop_RE_100yr.v2.out` → `Prop_RE_100yr`
pub fn run_name(path: &Path) -> String {
    let full = path.to_string_lossy();
    let file = full.rsplit(['/', '\\']).next().unwrap_or(&full);
    file.split('.').next().unwrap_or(file).to_owned()
}
