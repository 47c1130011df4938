//! Flags shared by the binaries for locating and overriding configuration.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::core::config::PlaceholderConfig;

/// Config file picked up when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "placeholder.ron";

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// RON config layers, merged in order (later wins). Defaults to `placeholder.ron` if present.
    #[arg(long = "config")]
    pub configs: Vec<PathBuf>,
    /// Manifest describing expected images (json, ron or toml).
    #[arg(long)]
    pub manifest: Option<PathBuf>,
    /// Directory that resolved manifest paths are relative to.
    #[arg(long)]
    pub asset_root: Option<PathBuf>,
    /// Edge length for files without a `_<N>` size suffix.
    #[arg(long)]
    pub default_size: Option<u32>,
}

impl ConfigArgs {
    /// Layered config files, then command line overrides, then validation warnings.
    pub fn resolve(&self) -> PlaceholderConfig {
        let layers: Vec<PathBuf> = if self.configs.is_empty() {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if fallback.is_file() { vec![fallback] } else { Vec::new() }
        } else {
            self.configs.clone()
        };
        let (mut cfg, used, errors) = PlaceholderConfig::load_layered(&layers);
        for e in &errors {
            warn!(target: "config", "{e}");
        }
        if !used.is_empty() {
            info!(target: "config", layers = ?used, "config loaded");
        }
        if let Some(m) = &self.manifest {
            cfg.manifest = m.clone();
        }
        if let Some(root) = &self.asset_root {
            cfg.asset_root = root.clone();
        }
        if let Some(size) = self.default_size {
            cfg.default_size = size;
        }
        for w in cfg.validate() {
            warn!(target: "config", "{w}");
        }
        cfg
    }
}
