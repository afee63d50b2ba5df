mod problem;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use forcex::Solver;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use problem::{run, Problem};
use report::render_summary;

#[derive(Parser)]
#[command(name = "forcex")]
#[command(about = "Solve 2D concurrent force systems for equilibrium or resultant")]
struct Cmd {
    /// JSON problem file
    problem: PathBuf,
    /// Numeric tolerance; overrides the value in the problem file
    #[arg(long)]
    tolerance: Option<f64>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Log solver decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();

    // Logs go to stderr so that `--json` output on stdout stays machine readable.
    let level = if cmd.verbose { Level::DEBUG } else { Level::WARN };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Known and unknown attributes come straight from the file; `null` marks
    // the values the solver has to find.
    let problem = Problem::load(&cmd.problem)?;

    // A tolerance on the command line overrides the one stored with the problem.
    let config = problem.solver_config(cmd.tolerance)?;

    // Building the system validates every force before any solving starts, so a
    // negative magnitude in the file is reported against the file.
    let system = problem
        .build_system()
        .with_context(|| format!("invalid force in {}", cmd.problem.display()))?;
    tracing::info!(
        path = %cmd.problem.display(),
        mode = %system.mode(),
        forces = system.len(),
        "problem loaded"
    );

    // The system's mode picks the analysis: equilibrium, a plain resultant, or a
    // solve against a prescribed resultant.
    let summary = run(system, Solver::new(config), problem.resultant)
        .with_context(|| format!("cannot solve {}", cmd.problem.display()))?;

    // Print either the JSON summary for other tools or a report for people.
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }

    Ok(())
}
