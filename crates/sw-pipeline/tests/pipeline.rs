//! End-to-end runs of the pipeline against in-memory result stores.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use sw_core::{EntityKind, LinkAttribute, NodeAttribute, PipelineConfig, run_name};
use sw_output::OutputLayout;
use sw_pipeline::{Pipeline, PipelineError};
use sw_store::{MemoryStore, MemoryStoreBuilder, StoreError, StoreResult};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn t(m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, m, 0).unwrap()
}

/// Run A: head 1, 2, 3 at t0..t2.
fn run_a() -> MemoryStore {
    MemoryStoreBuilder::new()
        .add_node_series("J1", NodeAttribute::Head, [(t(0), 1.0), (t(5), 2.0), (t(10), 3.0)])
        .add_node_series("J1", NodeAttribute::Depth, [(t(0), 1.234_567_89), (t(5), 0.5), (t(10), 0.25)])
        .add_link_series("C1", LinkAttribute::Flow, [(t(0), 0.1), (t(5), 0.2), (t(10), 0.3)])
        .add_link_series("C1", LinkAttribute::Depth, [(t(0), 0.4), (t(5), 0.5)])
        .build()
}

/// Run B: head 1.5, 2.5 at t0, t1; t2 never recorded.
fn run_b() -> MemoryStore {
    MemoryStoreBuilder::new()
        .add_node_series("J1", NodeAttribute::Head, [(t(0), 1.5), (t(5), 2.5)])
        .add_node_series("J1", NodeAttribute::Depth, [(t(0), 1.0), (t(5), 0.75), (t(10), 0.5)])
        .add_link_series("C1", LinkAttribute::Flow, [(t(5), 0.25)])
        .add_link_series("C1", LinkAttribute::Depth, [(t(0), 0.45), (t(5), 0.55)])
        .build()
}

fn open(path: &Path) -> StoreResult<MemoryStore> {
    match run_name(path).as_str() {
        "Existing_100yr" => Ok(run_a()),
        "Proposed_100yr" => Ok(run_b()),
        other => Err(StoreError::Format(format!("no run named {other}"))),
    }
}

fn config(out: &Path) -> PipelineConfig {
    let a = PathBuf::from("models/Existing_100yr.out");
    let b = PathBuf::from(r"models\Proposed_100yr.out");
    let mut cfg = PipelineConfig::new("Terminal F");
    cfg.output_dir = out.to_path_buf();
    cfg.result_files = vec![a.clone(), b.clone()];
    cfg.compare = Some([a, b]);
    cfg.node_ids = vec!["J1".into()];
    cfg.link_ids = vec!["C1".into()];
    cfg.node_params = vec!["head".into()];
    cfg.link_params = vec!["flow".into()];
    cfg.plot = false;
    cfg
}

fn layout(out: &Path) -> OutputLayout {
    OutputLayout::new(out, "Terminal F")
}

fn read_records(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap().iter().map(str::to_owned).collect()).collect()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn head_comparison_drops_unmatched_time() {
    let dir = tempfile::tempdir().unwrap();
    let report = Pipeline::new(config(dir.path())).run(open).unwrap();

    assert_eq!(report.runs, ["Existing_100yr", "Proposed_100yr"]);

    let path = layout(dir.path()).comparison_csv("Existing_100yr", "Proposed_100yr", EntityKind::Node, "head", false);
    assert!(path.ends_with("comparisons/Existing_100yr - VS - Proposed_100yr/head comparison.csv"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "id,time,head_sim1,head_sim2\n\
         J1,2024-06-01 00:00:00,1,1.5\n\
         J1,2024-06-01 00:05:00,2,2.5\n"
    );

    let flow = layout(dir.path()).comparison_csv("Existing_100yr", "Proposed_100yr", EntityKind::Link, "flow", false);
    assert_eq!(read_records(&flow), [["C1", "2024-06-01 00:05:00", "0.2", "0.25"]]);

    let counts: Vec<_> = report.comparisons.iter().map(|c| (c.kind, c.parameter.as_str(), c.rows)).collect();
    assert_eq!(counts, [(EntityKind::Node, "head", 2), (EntityKind::Link, "flow", 1)]);
}

#[test]
fn rerun_writes_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config(dir.path()));

    let first = pipeline.run(open).unwrap();
    let before: Vec<Vec<u8>> = first.files_written.iter().map(|p| fs::read(p).unwrap()).collect();

    let second = pipeline.run(open).unwrap();
    assert_eq!(first.files_written, second.files_written);
    let after: Vec<Vec<u8>> = second.files_written.iter().map(|p| fs::read(p).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn values_rounded_only_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.node_params = vec!["depth".into()];
    cfg.compare = None;
    let pipeline = Pipeline::new(cfg);

    let mut store = run_a();
    let run = pipeline.extract_run(&mut store, "Existing_100yr").unwrap();
    assert_eq!(run.nodes.rows()[0].values, [Some(1.234_567_89)]);

    pipeline.run(open).unwrap();
    let nodes = layout(dir.path()).table_csv("Existing_100yr", EntityKind::Node);
    assert_eq!(read_records(&nodes)[0], ["J1", "2024-06-01 00:00:00", "1.234568"]);
}

#[test]
fn unknown_parameter_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.node_params = vec!["head".into(), "banana".into()];

    let err = Pipeline::new(cfg).run(open).unwrap_err();
    assert!(matches!(err, PipelineError::MissingParameter { kind: EntityKind::Node, ref name } if name == "banana"));
    assert!(!layout(dir.path()).project_dir().exists());
}

#[test]
fn parameter_absent_from_store_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.node_params = vec!["head".into(), "flooding".into()];

    let err = Pipeline::new(cfg).run(open).unwrap_err();
    assert!(matches!(err, PipelineError::MissingParameter { kind: EntityKind::Node, .. }));
    assert!(!layout(dir.path()).table_csv("Existing_100yr", EntityKind::Node).exists());
}

#[test]
fn unknown_entity_fails_whole_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.link_ids = vec!["C1".into(), "C404".into()];

    let err = Pipeline::new(cfg).run(open).unwrap_err();
    assert!(matches!(err, PipelineError::MissingEntity { kind: EntityKind::Link, .. }));
    assert!(!layout(dir.path()).table_csv("Existing_100yr", EntityKind::Link).exists());
}

#[test]
fn preflight_names_missing_link_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.compare = None;
    let pipeline = Pipeline::new(cfg);
    pipeline.run(open).unwrap();

    let missing = layout(dir.path()).table_csv("Proposed_100yr", EntityKind::Link);
    fs::remove_file(&missing).unwrap();

    match pipeline.compare_runs("Existing_100yr", "Proposed_100yr") {
        Err(PipelineError::MissingInputFile { files }) => assert_eq!(files, [missing]),
        other => panic!("expected MissingInputFile, got {other:?}"),
    }
}

#[test]
fn shared_parameter_name_gets_kind_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.node_params = vec!["depth".into()];
    cfg.link_params = vec!["depth".into()];
    Pipeline::new(cfg).run(open).unwrap();

    let l = layout(dir.path());
    let nodes = l.comparison_csv("Existing_100yr", "Proposed_100yr", EntityKind::Node, "depth", true);
    let links = l.comparison_csv("Existing_100yr", "Proposed_100yr", EntityKind::Link, "depth", true);
    assert!(nodes.ends_with("nodes depth comparison.csv"));
    assert_eq!(read_records(&nodes).len(), 3);
    assert_eq!(read_records(&links).len(), 2);
}

#[test]
fn charts_written_when_plotting() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.plot = true;
    let report = Pipeline::new(cfg).run(open).unwrap();

    let l = layout(dir.path());
    let run_chart = l.run_plot("Existing_100yr", EntityKind::Node, "head");
    let cmp_chart = l.comparison_plot(
        "Existing_100yr",
        "Proposed_100yr",
        EntityKind::Link,
        &"C1".into(),
        "flow",
    );
    assert!(report.files_written.contains(&run_chart));
    assert!(report.files_written.contains(&cmp_chart));
    assert!(fs::read_to_string(&cmp_chart).unwrap().contains("<svg"));
    assert!(cmp_chart.ends_with("link_C1_flow_comparison.svg"));
}
