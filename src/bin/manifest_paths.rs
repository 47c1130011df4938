//! List every image path the manifest resolves to, with its placeholder edge
//! length and whether a file is already on disk. Read-only.

use anyhow::Result;
use asset_placeholders::{
    cli::ConfigArgs, extract_manifest, inventory, load_manifest, logging::init_logging,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Inspect resolved manifest image paths", version)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,
    /// Only print paths with no file on disk.
    #[arg(long)]
    missing: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(false);
    let cfg = args.config.resolve();
    let manifest = load_manifest(&cfg.manifest)?;
    let paths = extract_manifest(&manifest);

    let rows = inventory(&cfg, &paths, args.missing);
    for row in &rows {
        let state = if row.present { "present" } else { "missing" };
        println!("{state:<8} {:>5}px  {}", row.edge, row.path);
    }
    let missing = rows.iter().filter(|row| !row.present).count();
    println!("Paths: {} total, {} missing", paths.len(), missing);
    Ok(())
}
