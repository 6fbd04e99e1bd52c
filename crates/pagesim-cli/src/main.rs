//! Paging simulator front end.
//!
//! Usage: pagesim [OPTIONS] <TOTAL_FRAMES> <QUANTUM> <TRACES>...
//!
//! Splits the frame budget evenly between the traces, simulates each
//! replacement policy over identical copies of them, and prints one report
//! per policy.

mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pagesim_common::SimConfig;
use pagesim_core::{ReplacementPolicy, render_comparison};
use pagesim_workload::Workload;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    version,
    about = "Simulate round-robin scheduling with LRU and Clock page replacement."
)]
struct Cli {
    /// Total frames, divided evenly between the processes.
    total_frames: u32,

    /// Round-robin time quantum in ticks.
    quantum: u32,

    /// Trace files, one per process. The digits in each path, as given, are
    /// the process id.
    #[arg(required = true)]
    traces: Vec<PathBuf>,

    /// JSON file with default simulation parameters.
    #[arg(long, env = "PAGESIM_CONFIG")]
    config: Option<PathBuf>,

    /// Ticks a faulted process waits before it is ready again.
    #[arg(long)]
    swap_latency: Option<u64>,

    /// Maximum pages read from each trace.
    #[arg(long)]
    max_pages: Option<usize>,

    /// Replacement policy to simulate; repeat for several. Defaults to all.
    #[arg(long = "policy", value_parser = parse_policy)]
    policies: Vec<ReplacementPolicy>,

    /// Run the policies on separate threads.
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layers defaults, the optional config file, and command-line values.
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)
                .with_context(|| format!("while reading config {}", path.display()))?,
            None => SimConfig::default(),
        };
        config.total_frames = self.total_frames;
        config.quantum = self.quantum;
        if let Some(swap_latency) = self.swap_latency {
            config.swap_latency = swap_latency;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages_per_trace = max_pages;
        }
        config.validate()?;
        Ok(config)
    }

    fn policies(&self) -> Vec<ReplacementPolicy> {
        if self.policies.is_empty() {
            ReplacementPolicy::ALL.to_vec()
        } else {
            self.policies.clone()
        }
    }
}

fn parse_policy(s: &str) -> Result<ReplacementPolicy, String> {
    s.parse()
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.sim_config()?;
    let workload = Workload::load(&cli.traces, &config).context("while loading traces")?;
    let policies = cli.policies();
    info!(
        traces = workload.traces().len(),
        policies = ?policies,
        parallel = cli.parallel,
        "workload loaded"
    );

    let reports = workload.run_all(&policies, &config, cli.parallel)?;
    print!("{}", render_comparison(&reports));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::setup_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
