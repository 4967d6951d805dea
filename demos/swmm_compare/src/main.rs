//! swmm_compare — extract SWMM results to CSV and compare two runs.
//!
//! ```text
//! swmm_compare run pipeline.example.json
//! swmm_compare inspect runs/Ex_RE_EC_100yr.out
//! ```
//!
//! `RUST_LOG` sets the log filter; `--verbose` forces debug output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};

use sw_core::PipelineConfig;
use sw_core::time::format_csv;
use sw_pipeline::Pipeline;
use sw_store::OutFile;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log every series queried and every chart drawn.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, plot and compare the runs listed in a JSON configuration.
    Run {
        config: PathBuf,
    },
    /// Print what a SWMM binary output file contains.
    Inspect {
        file: PathBuf,
        /// Also list every node and link name.
        #[arg(long)]
        names: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run { config } => run(&config),
        Command::Inspect { file, names } => inspect(&file, names),
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !verbose => builder.parse_filters(&filters),
        _ => builder.filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info }),
    };
    builder.init();
}

fn run(config_path: &Path) -> Result<()> {
    let config = PipelineConfig::from_json_path(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let t0 = Instant::now();
    let report = Pipeline::new(config).run(|path: &Path| OutFile::open(path))?;

    for c in &report.comparisons {
        info!("{} {}: {} rows over {} entities", c.kind, c.parameter, c.rows, c.entities);
    }
    println!(
        "Extracted {} run(s), wrote {} file(s) in {:.2}s",
        report.runs.len(),
        report.files_written.len(),
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}

fn inspect(path: &Path, names: bool) -> Result<()> {
    let out = OutFile::open(path).with_context(|| format!("opening {}", path.display()))?;
    let s = out.summary();

    println!("{}", path.display());
    println!("  version         {}", s.version);
    println!("  flow units      {}", s.flow_units);
    println!("  subcatchments   {}", s.subcatchments);
    println!("  nodes           {}", s.nodes);
    println!("  links           {}", s.links);
    println!("  pollutants      {}", s.pollutants);
    println!("  report step     {} s", s.report_step_secs);
    println!("  periods         {}", s.periods);
    println!("  first           {}", format_csv(&s.first));
    println!("  last            {}", format_csv(&s.last));

    if names {
        println!("nodes:");
        for id in out.node_names() {
            println!("  {id}");
        }
        println!("links:");
        for id in out.link_names() {
            println!("  {id}");
        }
    }
    Ok(())
}
