use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::PlaceholderConfig;
use crate::manifest::ResolvedAssetPath;

use super::font::FontChoice;
use super::render::{render_placeholder, LabelStyle, OutputFormat};
use super::size_hint::SizeHint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created { size: u32 },
    /// Dry run: the file is missing and would be created at this size.
    Planned { size: u32 },
    /// A file already exists; it was not opened.
    Skipped,
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("create directory {}: {source}", dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no encoder for {}", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Materializes missing placeholders under the configured asset root.
pub struct Synthesizer<'a> {
    cfg: &'a PlaceholderConfig,
    font: FontChoice,
}

impl<'a> Synthesizer<'a> {
    pub fn new(cfg: &'a PlaceholderConfig, font: FontChoice) -> Self {
        Self { cfg, font }
    }

    pub fn font(&self) -> &FontChoice {
        &self.font
    }

    pub fn edge_for(&self, path: &ResolvedAssetPath) -> u32 {
        SizeHint::edge_for(path.as_path(), self.cfg.default_size, self.cfg.max_size)
    }

    /// What `ensure` would do, without touching the filesystem beyond an existence check.
    pub fn plan(&self, path: &ResolvedAssetPath) -> Outcome {
        if self.cfg.resolve_asset(path.as_path()).exists() {
            Outcome::Skipped
        } else {
            Outcome::Planned { size: self.edge_for(path) }
        }
    }

    /// Create a placeholder for `path` unless something is already there.
    pub fn ensure(&self, path: &ResolvedAssetPath) -> Result<Outcome, SynthesisError> {
        let target = self.cfg.resolve_asset(path.as_path());
        if target.exists() {
            debug!(target: "placeholder", path = %target.display(), "already present");
            return Ok(Outcome::Skipped);
        }
        let format = OutputFormat::from_path(&target)
            .ok_or_else(|| SynthesisError::UnsupportedFormat { path: target.clone() })?;
        if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|source| SynthesisError::CreateDir { dir: dir.to_path_buf(), source })?;
        }

        let size = self.edge_for(path);
        let style = LabelStyle {
            fill: self.cfg.fill.to_array(),
            text: self.cfg.text_color.to_array(),
            label_px: self.cfg.label_px(size),
        };
        let canvas = render_placeholder(size, &path.stem(), &self.font, &style);
        format
            .save(canvas, &target)
            .map_err(|source| SynthesisError::Encode { path: target.clone(), source })?;
        info!(target: "placeholder", path = %target.display(), size, "created placeholder");
        Ok(Outcome::Created { size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn cfg_at(root: &Path) -> PlaceholderConfig {
        PlaceholderConfig {
            asset_root: root.to_path_buf(),
            font_candidates: vec![],
            ..Default::default()
        }
    }

    fn rel(p: &str) -> ResolvedAssetPath {
        ResolvedAssetPath::resolve(Path::new(""), p)
    }

    #[test]
    fn creates_nested_dirs_and_sized_canvas() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = cfg_at(tmp.path());
        let synth = Synthesizer::new(&cfg, FontChoice::Builtin);
        let out = synth.ensure(&rel("Art/items/gold_coin_128.png")).unwrap();
        assert_eq!(out, Outcome::Created { size: 128 });
        let img = image::open(tmp.path().join("Art/items/gold_coin_128.png")).unwrap();
        assert_eq!((img.width(), img.height()), (128, 128));
    }

    #[test]
    fn exposes_the_font_it_labels_with() {
        let cfg = PlaceholderConfig::default();
        let synth = Synthesizer::new(&cfg, FontChoice::Builtin);
        assert!(matches!(synth.font(), FontChoice::Builtin));
        assert_eq!(synth.font().describe(), "built-in 5x7 bitmap");
    }

    #[test]
    fn existing_file_is_left_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = cfg_at(tmp.path());
        let target = tmp.path().join("icon.png");
        fs::write(&target, b"not really a png").unwrap();
        let synth = Synthesizer::new(&cfg, FontChoice::Builtin);
        assert_eq!(synth.ensure(&rel("icon.png")).unwrap(), Outcome::Skipped);
        assert_eq!(fs::read(&target).unwrap(), b"not really a png");
    }

    #[test]
    fn plan_reports_size_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = cfg_at(tmp.path());
        let synth = Synthesizer::new(&cfg, FontChoice::Builtin);
        let planned = synth.plan(&rel("Art/scenes/bg_1024x1024.png"));
        assert_eq!(planned, Outcome::Planned { size: 1024 });
        assert!(!tmp.path().join("Art").exists());
    }

    #[test]
    fn blocked_parent_is_a_create_dir_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Art"), b"file, not a directory").unwrap();
        let cfg = cfg_at(tmp.path());
        let synth = Synthesizer::new(&cfg, FontChoice::Builtin);
        let err = synth.ensure(&rel("Art/ui/ok.png")).unwrap_err();
        assert!(matches!(err, SynthesisError::CreateDir { .. }), "{err}");
    }
}
