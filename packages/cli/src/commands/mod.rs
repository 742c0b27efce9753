pub mod export;
pub mod init;
pub mod inspect;
pub mod replay;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use replay::{replay, ReplayArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use flowmaster_editor::{from_json, DiagramStore, GraphDocument};
use std::fs;
use std::path::{Path, PathBuf};

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Xml,
    All,
}

impl Format {
    fn includes_json(self) -> bool {
        matches!(self, Format::Json | Format::All)
    }

    fn includes_xml(self) -> bool {
        matches!(self, Format::Xml | Format::All)
    }
}

/// Output flags shared by commands that write diagrams
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "all")]
    pub format: Format,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,
}

/// Read and validate a JSON diagram
pub fn load_document(path: &Path) -> Result<GraphDocument> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = from_json(&source).with_context(|| format!("Invalid diagram {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        nodes = doc.nodes().len(),
        edges = doc.edges().len(),
        "loaded diagram"
    );
    Ok(doc)
}

/// Write the store's document in the requested formats; returns the files written
pub fn write_outputs(
    store: &DiagramStore,
    output: &OutputArgs,
    config: &Config,
    cwd: &Path,
) -> Result<Vec<PathBuf>> {
    if output.stdout {
        if output.format.includes_json() {
            println!("{}", store.export_json()?);
        }
        if output.format.includes_xml() {
            println!("{}", store.export_xml());
        }
        return Ok(Vec::new());
    }

    let out_dir = config.get_out_dir(cwd, output.out_dir.as_deref());
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    if output.format.includes_json() {
        written.push(store.export_json_to(&out_dir, Some(&config.json_file_name))?);
    }
    if output.format.includes_xml() {
        written.push(store.export_xml_to(&out_dir, Some(&config.xml_file_name))?);
    }

    for path in &written {
        println!("  {} {}", "✓".green(), path.display());
    }

    Ok(written)
}
