pub mod cli;
pub mod core;
pub mod driver;
pub mod logging;
pub mod manifest;
pub mod placeholder;

// Curated re-exports
pub use core::config::{PlaceholderConfig, Rgba8};
pub use driver::{
    inventory, run, synthesize_all, FailedAsset, PathStatus, RunOptions, RunReport,
};
pub use manifest::{extract, extract_manifest, load_manifest, ManifestNode, ResolvedAssetPath};
pub use placeholder::{Outcome, SynthesisError, Synthesizer};
