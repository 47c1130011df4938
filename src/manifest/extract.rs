//! Manifest path extraction.
//!
//! Walks a [`ManifestNode`] tree and collects every image reference, resolved
//! against the base directory in effect at that point of the tree. A mapping that
//! declares `basePath` replaces the context for its own subtree only; the context
//! is passed down by value, so siblings never observe an override.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Component, Path, PathBuf},
};

use tracing::trace;

use super::node::{ManifestNode, BASE_PATH_KEY};

/// Extensions (lowercase, without dot) treated as image references.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A manifest image reference joined to its base directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedAssetPath(PathBuf);

impl ResolvedAssetPath {
    /// Join `leaf` onto `context`. Absolute leaves are kept as-is; `.` components are dropped.
    pub fn resolve(context: &Path, leaf: &str) -> Self {
        let leaf = Path::new(leaf);
        let joined = if leaf.is_absolute() {
            leaf.to_path_buf()
        } else {
            context.join(leaf)
        };
        Self(normalize(&joined))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// File name without directory or extension; the placeholder label.
    pub fn stem(&self) -> String {
        self.0
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<String> {
        self.0.extension().map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}

impl AsRef<Path> for ResolvedAssetPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedAssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// True when `candidate` ends in a recognized image extension (case-insensitive).
pub fn is_image_reference(candidate: &str) -> bool {
    Path::new(candidate)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Walk a whole manifest from its root with an empty base directory.
pub fn extract_manifest(root: &ManifestNode) -> BTreeSet<ResolvedAssetPath> {
    extract(root, Path::new(""))
}

/// Collect the distinct image paths referenced anywhere under `node`.
pub fn extract(node: &ManifestNode, context: &Path) -> BTreeSet<ResolvedAssetPath> {
    let mut out = BTreeSet::new();
    walk(node, context, &mut out);
    out
}

fn walk(node: &ManifestNode, context: &Path, out: &mut BTreeSet<ResolvedAssetPath>) {
    match node {
        ManifestNode::Mapping(map) => {
            // Override replaces the inherited context outright, relative or not.
            let scoped = node.base_path().map(PathBuf::from);
            let context = scoped.as_deref().unwrap_or(context);
            trace!(
                target: "manifest",
                context = %context.display(),
                entries = map.len(),
                "walk mapping"
            );
            for (key, value) in map {
                if key == BASE_PATH_KEY {
                    continue;
                }
                walk(value, context, out);
            }
        }
        ManifestNode::Sequence(items) => {
            for item in items {
                match item {
                    ManifestNode::Mapping(_) | ManifestNode::StringLeaf(_) => {
                        walk(item, context, out)
                    }
                    ManifestNode::Sequence(_) | ManifestNode::Other => {}
                }
            }
        }
        ManifestNode::StringLeaf(s) => {
            if is_image_reference(s) {
                out.insert(ResolvedAssetPath::resolve(context, s));
            }
        }
        ManifestNode::Other => {}
    }
}
