use ron::value::Value;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// RGBA color as it appears in RON: `(200, 200, 200, 255)`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8(pub u8, pub u8, pub u8, pub u8);

impl Rgba8 {
    pub fn to_array(self) -> [u8; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Directory resolved manifest paths are materialized under.
    pub asset_root: PathBuf,
    /// Manifest document (json, ron or toml).
    pub manifest: PathBuf,
    pub default_size: u32,
    /// Size hints above this fall back to `default_size`.
    pub max_size: u32,
    pub fill: Rgba8,
    pub text_color: Rgba8,
    /// TrueType / OpenType files tried in order before the built-in bitmap font.
    pub font_candidates: Vec<PathBuf>,
    pub max_font_px: u32,
    pub font_divisor: u32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("client/assets"),
            manifest: PathBuf::from("client/assets/Art/art_config.json"),
            default_size: 256,
            max_size: 8192,
            fill: Rgba8(200, 200, 200, 255),
            text_color: Rgba8(0, 0, 0, 255),
            font_candidates: vec![
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
                PathBuf::from("/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"),
                PathBuf::from("/Library/Fonts/Arial Bold.ttf"),
                PathBuf::from("C:\\Windows\\Fonts\\arialbd.ttf"),
            ],
            max_font_px: 40,
            font_divisor: 6,
        }
    }
}

impl PlaceholderConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge RON documents in order (later keys win) and deserialize the result.
    /// Returns the config, the paths that contributed, and per-file errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<PlaceholderConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (PlaceholderConfig::default(), used, errors)
                }
            },
            None => (PlaceholderConfig::default(), used, errors),
        }
    }

    /// Non-fatal configuration warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.default_size == 0 {
            w.push("default_size is 0; placeholders cannot be allocated".into());
        }
        if self.max_size == 0 {
            w.push("max_size is 0; every size hint falls back to default_size".into());
        }
        if self.default_size > self.max_size {
            w.push(format!(
                "default_size {} greater than max_size {}",
                self.default_size, self.max_size
            ));
        }
        if self.default_size > 4096 {
            w.push(format!(
                "very large default_size {}; each placeholder allocates {} bytes",
                self.default_size,
                self.default_size as u64 * self.default_size as u64 * 4
            ));
        }
        if self.font_divisor == 0 {
            w.push("font_divisor is 0 -> treated as 1".into());
        }
        if self.max_font_px == 0 {
            w.push("max_font_px is 0 -> labels drawn at 1px".into());
        }
        if self.font_candidates.is_empty() {
            w.push("font_candidates empty; built-in bitmap font always used".into());
        }
        if self.fill.3 == 0 {
            w.push("fill alpha is 0; placeholders will be fully transparent".into());
        }
        if self.fill == self.text_color {
            w.push("fill and text_color identical; labels invisible".into());
        }
        if !self.asset_root.is_dir() {
            w.push(format!(
                "asset_root {} does not exist yet; it will be created on demand",
                self.asset_root.display()
            ));
        }
        w
    }

    /// Filesystem location of a manifest-relative asset path.
    pub fn resolve_asset(&self, relative: &Path) -> PathBuf {
        self.asset_root.join(relative)
    }

    /// Label pixel height for a canvas of `size` pixels.
    pub fn label_px(&self, size: u32) -> u32 {
        (size / self.font_divisor.max(1)).min(self.max_font_px).max(1)
    }
}

/// Recursively overlay `overlay` onto `base`: maps merge key by key, anything else replaces.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historic_placeholder_look() {
        let cfg = PlaceholderConfig::default();
        assert_eq!(cfg.default_size, 256);
        assert_eq!(cfg.fill, Rgba8(200, 200, 200, 255));
        assert_eq!(cfg.text_color.to_array(), [0, 0, 0, 255]);
    }

    #[test]
    fn label_px_caps_and_scales() {
        let cfg = PlaceholderConfig::default();
        assert_eq!(cfg.label_px(1024), 40);
        assert_eq!(cfg.label_px(128), 21);
        assert_eq!(cfg.label_px(3), 1);
        let zero_div = PlaceholderConfig { font_divisor: 0, ..Default::default() };
        assert_eq!(zero_div.label_px(30), 30);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: PlaceholderConfig = ron::from_str("(default_size: 64)").unwrap();
        assert_eq!(cfg.default_size, 64);
        assert_eq!(cfg.max_size, 8192);
        assert_eq!(cfg.max_font_px, 40);
    }

    #[test]
    fn example_config_matches_defaults() {
        let cfg: PlaceholderConfig =
            ron::from_str(include_str!("../../../config/placeholder.example.ron")).unwrap();
        let defaults = PlaceholderConfig::default();
        assert_eq!(cfg.default_size, defaults.default_size);
        assert_eq!(cfg.fill, defaults.fill);
        assert_eq!(cfg.font_candidates[0], defaults.font_candidates[0]);
    }

    #[test]
    fn merge_value_recurses_into_nested_maps() {
        let mut base: Value = ron::from_str("{\"a\": {\"x\": 1, \"y\": 2}, \"b\": 3}").unwrap();
        let overlay: Value = ron::from_str("{\"a\": {\"y\": 20, \"z\": 30}}").unwrap();
        merge_value(&mut base, overlay);
        let expected: Value =
            ron::from_str("{\"a\": {\"x\": 1, \"y\": 20, \"z\": 30}, \"b\": 3}").unwrap();
        assert_eq!(base, expected);
    }

    #[test]
    fn merge_value_replaces_non_maps() {
        let mut base: Value = ron::from_str("{\"a\": [1, 2]}").unwrap();
        merge_value(&mut base, ron::from_str("{\"a\": [3]}").unwrap());
        assert_eq!(base, ron::from_str::<Value>("{\"a\": [3]}").unwrap());
    }

    #[test]
    fn validate_flags_inverted_sizes() {
        let cfg = PlaceholderConfig { default_size: 512, max_size: 128, ..Default::default() };
        let warns = cfg.validate().join("\n");
        assert!(warns.contains("greater than max_size"), "{warns}");
    }

    #[test]
    fn absolute_paths_escape_asset_root() {
        let cfg = PlaceholderConfig::default();
        let art = cfg.resolve_asset(Path::new("Art/a.png"));
        assert_eq!(art, Path::new("client/assets/Art/a.png"));
        #[cfg(unix)]
        assert_eq!(cfg.resolve_asset(Path::new("/tmp/a.png")), Path::new("/tmp/a.png"));
    }
}
