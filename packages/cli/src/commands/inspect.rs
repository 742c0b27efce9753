use super::load_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flowmaster_editor::{GraphDocument, ShapeKind};
use std::path::Path;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Diagram JSON file
    pub path: String,
}

/// Nodes of one shape kind and the outline they are drawn with
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeCount {
    pub kind: ShapeKind,
    pub count: usize,
    pub outline: String,
}

/// Counts reported by `inspect`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiagramStats {
    pub nodes: usize,
    pub edges: usize,
    pub selected_nodes: usize,
    pub selected_edges: usize,
    pub dangling_edges: Vec<String>,
    pub shapes: Vec<ShapeCount>,
}

impl DiagramStats {
    pub fn collect(doc: &GraphDocument) -> Self {
        let shapes = ShapeKind::ALL
            .iter()
            .map(|kind| ShapeCount {
                kind: *kind,
                count: doc.nodes().iter().filter(|n| n.data.shape == *kind).count(),
                outline: kind.outline().describe(),
            })
            .filter(|shape| shape.count > 0)
            .collect();

        Self {
            nodes: doc.nodes().len(),
            edges: doc.edges().len(),
            selected_nodes: doc.selected_nodes().count(),
            selected_edges: doc.selected_edges().count(),
            dangling_edges: doc.dangling_edges().iter().map(|e| e.id.clone()).collect(),
            shapes,
        }
    }
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.path);
    let stats = DiagramStats::collect(&load_document(&path)?);

    println!("{} {}", "🔍".bright_blue(), path.display().to_string().bold());
    println!("  Nodes: {} ({} selected)", stats.nodes, stats.selected_nodes);
    println!("  Edges: {} ({} selected)", stats.edges, stats.selected_edges);

    for shape in &stats.shapes {
        println!(
            "    {:<10} {:>4}  {}",
            shape.kind.as_str(),
            shape.count,
            shape.outline.as_str().dimmed()
        );
    }

    if stats.dangling_edges.is_empty() {
        println!("  {} No dangling edges", "✓".green());
    } else {
        println!(
            "  {} {} dangling edges: {}",
            "⚠️".yellow(),
            stats.dangling_edges.len(),
            stats.dangling_edges.join(", ")
        );
    }

    Ok(())
}
