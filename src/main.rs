//! Placeholder asset generator
//!
//! Reads the art manifest, resolves every referenced image against its `basePath`
//! scope and writes a labeled placeholder for each one missing on disk. Existing
//! files are never touched, so the tool can be rerun at any time.
//!
//! Usage:
//!   cargo run -- \
//!       --manifest client/assets/Art/art_config.json \
//!       --asset-root client/assets \
//!       --json-report target/placeholders.json

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use asset_placeholders::{cli::ConfigArgs, logging::init_logging, run, RunOptions};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    about = "Generate placeholder images for assets referenced by the art manifest",
    version,
    author
)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
    /// TrueType / OpenType font for labels, tried before any other.
    #[arg(long)]
    font: Option<PathBuf>,
    /// List missing images without writing anything.
    #[arg(long)]
    dry_run: bool,
    /// Write the run report as JSON.
    #[arg(long)]
    json_report: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = args.config.resolve();
    let options = RunOptions { dry_run: args.dry_run, font: args.font.clone() };
    let report = run(&cfg, &options)?;

    for failed in &report.failed {
        eprintln!("failed: {} ({})", failed.path, failed.error);
    }
    println!("{}", report.summary_line());

    if let Some(out) = &args.json_report {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(out, json).with_context(|| format!("write {:?}", out))?;
    }
    if !report.is_success() {
        anyhow::bail!("{} placeholder(s) could not be written", report.failed.len());
    }
    Ok(())
}
