//! Command-line wrapper (§6): loads a task, runs the search harness, and
//! writes `searchlog.out` / `plan.ipc` to the output directory.

mod problems;

use anyhow::{Context, Result};
use clap::Parser;
use planner_core::plan::{write_searchlog, SearchOutcome};
use planner_core::{search, Config};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

/// An automated planner for functional-STRIPS problems.
#[derive(Debug, Parser)]
#[command(name = "planner", version, about)]
struct Opt {
    /// Search timeout, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Input problem directory.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Output directory for `searchlog.out` and `plan.ipc`.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Logging level: one of "error", "warn", "info", "debug", "trace".
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    let log_level: tracing::Level = opt.log_level.parse().unwrap_or_else(|_| {
        eprintln!("unrecognized --log-level {:?}, defaulting to info", opt.log_level);
        tracing::Level::INFO
    });
    let subscriber = tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::Uptime::from(std::time::Instant::now()))
        .with_max_level(log_level)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber was already set");
    }

    match run(&opt) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(opt: &Opt) -> Result<ExitCode> {
    std::fs::create_dir_all(&opt.out).with_context(|| format!("creating output directory {}", opt.out.display()))?;

    let task = problems::load(&opt.data).with_context(|| format!("loading problem from {}", opt.data.display()))?;

    let config = Config {
        timeout: std::time::Duration::from_secs(opt.timeout),
        ..Config::default()
    };
    if let Err(e) = config.validate(&task.actions) {
        return Ok(ExitCode::from(e.exit_code() as u8));
    }

    let (outcome, stats) = search::search(&task, &config);

    let searchlog_path = opt.out.join("searchlog.out");
    let mut searchlog = File::create(&searchlog_path).with_context(|| format!("creating {}", searchlog_path.display()))?;
    write_searchlog(&outcome, &stats, &task, &mut searchlog)?;

    let plan_path = opt.out.join("plan.ipc");
    let mut plan_file = File::create(&plan_path).with_context(|| format!("creating {}", plan_path.display()))?;

    match outcome {
        SearchOutcome::Solved(plan) => {
            plan.write_ipc(&task, &mut plan_file)?;
            anyhow::ensure!(plan.replay_reaches_goal(&task), "plan replay did not reach the goal; this is a bug");
            tracing::info!(length = plan.len(), "plan found");
            Ok(ExitCode::from(0))
        }
        SearchOutcome::Unsolvable => {
            tracing::info!("no plan");
            Ok(ExitCode::from(2))
        }
        SearchOutcome::TimedOut => {
            tracing::warn!(nodes_expanded = stats.nodes_expanded, "timed out");
            Ok(ExitCode::from(2))
        }
    }
}
