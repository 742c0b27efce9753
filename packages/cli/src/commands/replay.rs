use super::{load_document, write_outputs, OutputArgs};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use flowmaster_editor::{Action, DiagramStore, GraphDocument};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Action script (JSON array of actions)
    pub script: String,

    /// Starting diagram (defaults to an empty document)
    #[arg(short, long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Outcome of running a script
#[derive(Debug, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub ignored: usize,
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let doc = match &args.input {
        Some(input) => load_document(&cwd.join(input))?,
        None => GraphDocument::default(),
    };
    let mut store = DiagramStore::from_document(doc, config.editor_options());

    let script_path = cwd.join(&args.script);
    let source = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid action script {}", script_path.display()))?;

    let summary = run_script(&mut store, actions);

    if !args.output.stdout {
        println!("{}", "▶️  Replaying actions...".bright_blue().bold());
        println!(
            "  {} actions applied, {} ignored",
            summary.applied.to_string().green(),
            summary.ignored.to_string().yellow()
        );
    }

    write_outputs(&store, &args.output, &config, cwd)?;
    Ok(())
}

/// Dispatch every action in order
pub fn run_script(store: &mut DiagramStore, actions: Vec<Action>) -> ReplaySummary {
    let mut summary = ReplaySummary { applied: 0, ignored: 0 };

    for (index, action) in actions.into_iter().enumerate() {
        tracing::debug!(index, ?action, "dispatch");
        if store.dispatch(action) {
            summary.applied += 1;
        } else {
            tracing::debug!(index, "action had no effect");
            summary.ignored += 1;
        }
    }

    summary
}
