//! One placeholder pass: load the manifest, extract paths, ensure each one.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::config::PlaceholderConfig;
use crate::manifest::{extract_manifest, load_manifest, ResolvedAssetPath};
use crate::placeholder::{font_sources, resolve_font, Outcome, SizeHint, Synthesizer};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report what would be created without writing anything.
    pub dry_run: bool,
    /// Font tried before `PLACEHOLDER_FONT` and the configured candidates.
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedAsset {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RunReport {
    pub discovered: usize,
    pub created: usize,
    pub present: usize,
    pub planned: usize,
    pub failed: Vec<FailedAsset>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary_line(&self) -> String {
        let mut s = format!(
            "discovered {} image paths: {} created, {} already present",
            self.discovered, self.created, self.present
        );
        if self.planned > 0 {
            s.push_str(&format!(", {} would be created (dry run)", self.planned));
        }
        if !self.failed.is_empty() {
            s.push_str(&format!(", {} failed", self.failed.len()));
        }
        s
    }

    fn record(&mut self, path: &ResolvedAssetPath, result: Result<Outcome, String>) {
        match result {
            Ok(Outcome::Created { .. }) => self.created += 1,
            Ok(Outcome::Planned { .. }) => self.planned += 1,
            Ok(Outcome::Skipped) => self.present += 1,
            Err(error) => self.failed.push(FailedAsset { path: path.to_string(), error }),
        }
    }
}

/// Process every path in order; a failure is recorded and the batch continues.
pub fn synthesize_all<'p, I>(synth: &Synthesizer<'_>, paths: I, dry_run: bool) -> RunReport
where
    I: IntoIterator<Item = &'p ResolvedAssetPath>,
{
    let mut report = RunReport::default();
    for path in paths {
        report.discovered += 1;
        let result = if dry_run {
            Ok(synth.plan(path))
        } else {
            synth.ensure(path).map_err(|e| {
                warn!(target: "driver", path = %path, "placeholder failed: {e}");
                e.to_string()
            })
        };
        if let Ok(Outcome::Planned { size }) = result {
            info!(target: "driver", path = %path, size, "missing (dry run)");
        }
        report.record(path, result);
    }
    report
}

/// One row of a read-only listing: where the placeholder goes, how big it would be,
/// and whether a file is already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStatus {
    pub path: ResolvedAssetPath,
    pub edge: u32,
    pub present: bool,
}

/// Existence and edge length for each path, in iteration order.
/// With `missing_only`, paths that already have a file are left out.
pub fn inventory<'p, I>(cfg: &PlaceholderConfig, paths: I, missing_only: bool) -> Vec<PathStatus>
where
    I: IntoIterator<Item = &'p ResolvedAssetPath>,
{
    paths
        .into_iter()
        .map(|path| PathStatus {
            path: path.clone(),
            edge: SizeHint::edge_for(path.as_path(), cfg.default_size, cfg.max_size),
            present: cfg.resolve_asset(path.as_path()).exists(),
        })
        .filter(|row| !(missing_only && row.present))
        .collect()
}

/// Load the configured manifest and ensure a placeholder for every image it references.
/// Only a missing or unparsable manifest is an error; per-asset failures land in the report.
pub fn run(cfg: &PlaceholderConfig, options: &RunOptions) -> Result<RunReport> {
    let manifest = load_manifest(&cfg.manifest)?;
    let paths = extract_manifest(&manifest);
    info!(
        target: "driver",
        manifest = %cfg.manifest.display(),
        asset_root = %cfg.asset_root.display(),
        count = paths.len(),
        "image paths discovered"
    );

    let font = resolve_font(&font_sources(options.font.clone(), &cfg.font_candidates));
    let synth = Synthesizer::new(cfg, font);
    info!(target: "driver", font = %synth.font().describe(), "label font");
    Ok(synthesize_all(&synth, &paths, options.dry_run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let mut r = RunReport { discovered: 3, created: 2, present: 1, ..Default::default() };
        assert_eq!(r.summary_line(), "discovered 3 image paths: 2 created, 1 already present");
        assert!(r.is_success());
        r.failed.push(FailedAsset { path: "x.png".into(), error: "boom".into() });
        assert!(r.summary_line().ends_with(", 1 failed"));
        assert!(!r.is_success());
    }

    #[test]
    fn inventory_filters_present_paths_on_request() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = PlaceholderConfig { asset_root: tmp.path().to_path_buf(), ..Default::default() };
        std::fs::create_dir_all(tmp.path().join("Art")).unwrap();
        std::fs::write(tmp.path().join("Art/here_64.png"), b"x").unwrap();
        let paths = [
            ResolvedAssetPath::resolve(Path::new("Art"), "here_64.png"),
            ResolvedAssetPath::resolve(Path::new("Art"), "gone_128x96.png"),
        ];

        let all = inventory(&cfg, &paths, false);
        let rows: Vec<_> = all.iter().map(|r| (r.path.to_string(), r.edge, r.present)).collect();
        assert_eq!(
            rows,
            vec![
                (paths[0].to_string(), 64, true),
                (paths[1].to_string(), 128, false),
            ]
        );

        let missing = inventory(&cfg, &paths, true);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].path, paths[1]);
        assert!(!missing[0].present);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = PlaceholderConfig {
            asset_root: tmp.path().to_path_buf(),
            manifest: tmp.path().join("absent.json"),
            ..Default::default()
        };
        let err = run(&cfg, &RunOptions::default()).unwrap_err();
        assert!(err.to_string().contains("manifest not found"), "{err}");
    }
}
