//! Label font resolution.
//!
//! Fonts are looked up through an ordered list of sources; the first one that
//! reads and decodes wins. When nothing resolves the built-in 5x7 bitmap font is
//! used, so a missing system font never stops placeholder generation.

use std::{fmt, fs, path::PathBuf};

use ab_glyph::FontVec;
use tracing::debug;

/// Environment variable naming a font file to try before the configured candidates.
pub const FONT_ENV_VAR: &str = "PLACEHOLDER_FONT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    /// Path read from an environment variable at resolution time.
    EnvVar(&'static str),
}

/// Result of a single source lookup.
pub enum Resolution {
    Resolved(FontVec, PathBuf),
    Unresolved,
}

impl FontSource {
    pub fn try_resolve(&self) -> Resolution {
        let path = match self {
            FontSource::File(p) => p.clone(),
            FontSource::EnvVar(var) => match std::env::var_os(var) {
                Some(v) if !v.is_empty() => PathBuf::from(v),
                _ => return Resolution::Unresolved,
            },
        };
        let data = match fs::read(&path) {
            Ok(d) => d,
            Err(e) => {
                debug!(target: "placeholder", font = %path.display(), "font unreadable: {e}");
                return Resolution::Unresolved;
            }
        };
        match FontVec::try_from_vec(data) {
            Ok(font) => Resolution::Resolved(font, path),
            Err(e) => {
                debug!(target: "placeholder", font = %path.display(), "font rejected: {e}");
                Resolution::Unresolved
            }
        }
    }
}

pub enum FontChoice {
    Outline { font: FontVec, source: PathBuf },
    Builtin,
}

impl fmt::Debug for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontChoice::Outline { source, .. } => write!(f, "Outline({})", source.display()),
            FontChoice::Builtin => f.write_str("Builtin"),
        }
    }
}

impl FontChoice {
    pub fn describe(&self) -> String {
        match self {
            FontChoice::Outline { source, .. } => source.display().to_string(),
            FontChoice::Builtin => "built-in 5x7 bitmap".into(),
        }
    }
}

/// Lookup order: explicit override, `PLACEHOLDER_FONT`, then configured candidates.
pub fn font_sources(explicit: Option<PathBuf>, candidates: &[PathBuf]) -> Vec<FontSource> {
    let mut sources: Vec<FontSource> = explicit.into_iter().map(FontSource::File).collect();
    sources.push(FontSource::EnvVar(FONT_ENV_VAR));
    sources.extend(candidates.iter().cloned().map(FontSource::File));
    sources
}

pub fn resolve_font(sources: &[FontSource]) -> FontChoice {
    for source in sources {
        if let Resolution::Resolved(font, source) = source.try_resolve() {
            return FontChoice::Outline { font, source };
        }
    }
    FontChoice::Builtin
}

pub const BITMAP_WIDTH: u32 = 5;
pub const BITMAP_HEIGHT: u32 = 7;

/// Rows of a 5x7 cell, most significant of the low five bits is the leftmost column.
/// Lowercase letters share the uppercase shapes; unknown characters draw as a box.
pub fn bitmap_glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ' ' => [0x00; 7],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

/// An installed TrueType font for tests of the outline path: `PLACEHOLDER_FONT`
/// first, then the default candidates. `None` on machines without one.
#[cfg(test)]
pub(crate) fn installed_test_font() -> Option<PathBuf> {
    std::env::var_os(FONT_ENV_VAR)
        .map(PathBuf::from)
        .into_iter()
        .chain(crate::core::config::PlaceholderConfig::default().font_candidates)
        .find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_font_file_resolves() {
        let Some(path) = installed_test_font() else {
            eprintln!("no TrueType font installed; skipping");
            return;
        };
        match FontSource::File(path.clone()).try_resolve() {
            Resolution::Resolved(_, source) => assert_eq!(source, path),
            Resolution::Unresolved => panic!("{} should decode", path.display()),
        }
        let choice = resolve_font(&font_sources(Some(path.clone()), &[]));
        assert_eq!(choice.describe(), path.display().to_string());
    }

    #[test]
    fn env_var_source_resolves_once_set() {
        const VAR: &str = "PLACEHOLDER_FONT_ENV_SOURCE_TEST";
        let Some(path) = installed_test_font() else {
            eprintln!("no TrueType font installed; skipping");
            return;
        };
        std::env::remove_var(VAR);
        assert!(matches!(FontSource::EnvVar(VAR).try_resolve(), Resolution::Unresolved));
        std::env::set_var(VAR, &path);
        let resolved = FontSource::EnvVar(VAR).try_resolve();
        std::env::remove_var(VAR);
        match resolved {
            Resolution::Resolved(_, source) => assert_eq!(source, path),
            Resolution::Unresolved => panic!("{VAR} should resolve to {}", path.display()),
        }
    }

    #[test]
    fn missing_files_fall_through_to_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        let sources = vec![
            FontSource::File(tmp.path().join("nope.ttf")),
            FontSource::EnvVar("PLACEHOLDER_FONT_TEST_UNSET_VAR"),
        ];
        assert!(matches!(resolve_font(&sources), FontChoice::Builtin));
    }

    #[test]
    fn garbage_font_is_unresolved() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("bogus.ttf");
        fs::write(&bogus, b"definitely not a font").unwrap();
        assert!(matches!(FontSource::File(bogus).try_resolve(), Resolution::Unresolved));
    }

    #[test]
    fn explicit_font_is_tried_first() {
        let sources = font_sources(Some(PathBuf::from("mine.ttf")), &[PathBuf::from("sys.ttf")]);
        assert_eq!(
            sources,
            vec![
                FontSource::File(PathBuf::from("mine.ttf")),
                FontSource::EnvVar(FONT_ENV_VAR),
                FontSource::File(PathBuf::from("sys.ttf")),
            ]
        );
    }

    #[test]
    fn lowercase_shares_uppercase_cells() {
        assert_eq!(bitmap_glyph('q'), bitmap_glyph('Q'));
        assert_eq!(bitmap_glyph('~'), bitmap_glyph('\u{2603}'));
        assert!(bitmap_glyph(' ').iter().all(|r| *r == 0));
        assert!(bitmap_glyph('W').iter().all(|r| *r < 0x20));
    }
}
