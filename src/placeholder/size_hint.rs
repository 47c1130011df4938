use regex::Regex;
use std::{path::Path, sync::OnceLock};

/// `gold_coin_128.png`, `bg_1024x768.jpg`; the `x<M>` part is parsed and ignored.
fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"_(\d+)(?:x\d+)?\.[A-Za-z]+$").expect("static size pattern"))
}

/// Square edge length parsed from a filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHint(pub u32);

impl SizeHint {
    /// Parse the trailing `_<N>` token of a file name. Zero or overflowing values yield `None`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = size_pattern().captures(file_name)?;
        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
        (n > 0).then_some(SizeHint(n))
    }

    /// Edge length for `path`: its hint when present and not above `max`, else `default`.
    pub fn edge_for(path: &Path, default: u32, max: u32) -> u32 {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::parse)
            .map(|SizeHint(n)| n)
            .filter(|n| *n <= max)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_digits_become_the_edge() {
        assert_eq!(SizeHint::parse("gold_coin_128.png"), Some(SizeHint(128)));
        assert_eq!(SizeHint::parse("coffee_shop_bg_1024x1024.png"), Some(SizeHint(1024)));
        assert_eq!(SizeHint::parse("wide_640x32.webp"), Some(SizeHint(640)));
    }

    #[test]
    fn no_suffix_or_bad_value_falls_back() {
        assert_eq!(SizeHint::parse("icon.png"), None);
        assert_eq!(SizeHint::parse("cat_01_idle.png"), None);
        assert_eq!(SizeHint::parse("empty_0.png"), None);
        assert_eq!(SizeHint::parse("huge_99999999999.png"), None);
        assert_eq!(SizeHint::parse("level2.png"), None);
    }

    #[test]
    fn edge_for_applies_default_and_cap() {
        assert_eq!(SizeHint::edge_for(Path::new("Art/items/gold_coin_128.png"), 256, 8192), 128);
        assert_eq!(SizeHint::edge_for(Path::new("Art/ui/icon.png"), 256, 8192), 256);
        assert_eq!(SizeHint::edge_for(Path::new("Art/bg_20000.png"), 256, 8192), 256);
    }
}
