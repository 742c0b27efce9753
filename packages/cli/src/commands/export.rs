use super::{load_document, write_outputs, OutputArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flowmaster_editor::DiagramStore;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Diagram JSON file
    pub path: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let doc = load_document(&cwd.join(&args.path))?;
    let store = DiagramStore::from_document(doc, config.editor_options());

    if !args.output.stdout {
        println!("{}", "📦 Exporting diagram...".bright_blue().bold());
    }

    write_outputs(&store, &args.output, &config, cwd)?;
    Ok(())
}
