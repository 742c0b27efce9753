use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Export directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Maximum undo steps kept while replaying (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub history_limit: usize,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        out_dir: args.out_dir.clone(),
        history_limit: args.history_limit,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: flowmaster export diagram.json");
    println!("  2. Check output in {}/", args.out_dir);

    Ok(())
}
