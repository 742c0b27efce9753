mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, init, inspect, replay, ExportArgs, InitArgs, InspectArgs, ReplayArgs};
use tracing_subscriber::EnvFilter;

/// FlowMaster CLI - export, replay and inspect flowchart diagrams
#[derive(Parser, Debug)]
#[command(name = "flowmaster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a flowmaster.config.json
    Init(InitArgs),

    /// Export a JSON diagram as JSON and/or XML
    Export(ExportArgs),

    /// Run an action script and export the resulting diagram
    Replay(ReplayArgs),

    /// Print counts and dangling edges of a diagram
    Inspect(InspectArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
        Command::Inspect(args) => inspect(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
