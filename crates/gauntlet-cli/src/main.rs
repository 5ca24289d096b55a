//! Command-line interface for the Gauntlet scenario harness.
//!
//! `run` executes one scenario end to end; `benchmark`, `train-risk`,
//! `train-adversary`, and `replay` are declared entry points whose
//! implementations are pending; they print what they would do and
//! exit cleanly.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, CommandFactory, Parser, Subcommand};

use gauntlet_adapter::{ProgressRecord, ProgressSink};
use gauntlet_runner::{run_scenario, RunOptions};
use gauntlet_sim::KinematicSim;

#[derive(Parser, Debug)]
#[command(
    name = "gauntlet",
    version,
    about = "Scenario gauntlet for autonomy stacks"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single scenario
    Run(RunArgs),
    /// Run a benchmark suite
    Benchmark(BenchmarkArgs),
    /// Train the failure-risk model
    TrainRisk(TrainRiskArgs),
    /// Train the RL adversary
    TrainAdversary(TrainAdversaryArgs),
    /// Replay a previous run
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to the scenario YAML file
    #[arg(long)]
    scenario: PathBuf,

    /// Output directory for run records
    #[arg(long, default_value = "runs")]
    output: PathBuf,

    /// Disable the rendering window
    #[arg(long)]
    no_render: bool,
}

#[derive(Args, Debug)]
struct BenchmarkArgs {
    /// Path to the benchmark suite config
    #[arg(long)]
    suite: PathBuf,

    /// Output directory
    #[arg(long, default_value = "runs/benchmarks")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct TrainRiskArgs {
    /// Path to collected feature data
    #[arg(long)]
    data: PathBuf,

    /// Model output directory
    #[arg(long, default_value = "models/risk")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct TrainAdversaryArgs {
    /// Path to the adversary config
    #[arg(long)]
    config: PathBuf,

    /// Model output directory
    #[arg(long, default_value = "models/adversary")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Run ID to replay
    #[arg(long)]
    run_id: String,
}

/// Prints progress records in the fixed human-readable format external
/// tooling parses: position (2 decimals), speed (2 decimals), reward
/// (3 decimals), lane membership.
struct StdoutReporter;

impl ProgressSink for StdoutReporter {
    fn record(&mut self, record: &ProgressRecord) {
        println!(
            "Step {:3}: pos=({:6.2}, {:6.2}), speed={:5.2} m/s, reward={:6.3}, on_lane={}",
            record.step,
            record.position.x,
            record.position.y,
            record.speed,
            record.reward,
            record.on_lane
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        // No subcommand: print usage, exit 1.
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    let result = match command {
        Commands::Run(args) => cmd_run(args),
        Commands::Benchmark(args) => cmd_benchmark(args),
        Commands::TrainRisk(args) => cmd_train_risk(args),
        Commands::TrainAdversary(args) => cmd_train_adversary(args),
        Commands::Replay(args) => cmd_replay(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    println!("Loading scenario: {}", args.scenario.display());

    let mut opts = RunOptions::new(args.scenario, args.output);
    opts.render = !args.no_render;

    let outcome = run_scenario(&opts, KinematicSim::connect, &mut StdoutReporter)?;

    let report = &outcome.report;
    println!(
        "\nEpisode ended after {} steps: {}",
        report.steps_taken, report.terminal_reason
    );
    println!(
        "Final ego state: pos=({:.2}, {:.2}), speed={:.2} m/s, on_lane={}",
        report.final_ego_state.position.x,
        report.final_ego_state.position.y,
        report.final_ego_state.speed,
        report.final_ego_state.on_lane
    );
    println!(
        "\nScenario complete. Output saved to: {}",
        outcome.run_dir.display()
    );
    Ok(())
}

fn cmd_benchmark(args: BenchmarkArgs) -> anyhow::Result<()> {
    println!(
        "benchmark is not implemented yet (suite: {}, output: {})",
        args.suite.display(),
        args.output.display()
    );
    Ok(())
}

fn cmd_train_risk(args: TrainRiskArgs) -> anyhow::Result<()> {
    println!(
        "train-risk is not implemented yet (data: {}, output: {})",
        args.data.display(),
        args.output.display()
    );
    Ok(())
}

fn cmd_train_adversary(args: TrainAdversaryArgs) -> anyhow::Result<()> {
    println!(
        "train-adversary is not implemented yet (config: {}, output: {})",
        args.config.display(),
        args.output.display()
    );
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    println!("replay is not implemented yet (run id: {})", args.run_id);
    Ok(())
}
