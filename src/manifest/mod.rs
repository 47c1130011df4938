//! Manifest loading and image path discovery.

pub mod extract;
pub mod loader;
pub mod node;

pub use extract::{
    extract, extract_manifest, is_image_reference, ResolvedAssetPath, IMAGE_EXTENSIONS,
};
pub use loader::{load_manifest, ManifestError, ManifestFormat};
pub use node::{ManifestNode, BASE_PATH_KEY};
