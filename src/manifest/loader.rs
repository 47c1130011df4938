use std::{fs, path::{Path, PathBuf}};

use thiserror::Error;
use tracing::debug;

use super::node::ManifestNode;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {format:?} manifest {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: ManifestFormat,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Ron,
    Toml,
}

impl ManifestFormat {
    /// Format implied by the file extension; anything unknown is read as json.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("ron") => ManifestFormat::Ron,
            Some("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Json,
        }
    }

    pub fn parse(self, text: &str) -> Result<ManifestNode, String> {
        match self {
            ManifestFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            ManifestFormat::Ron => ron::from_str(text).map_err(|e| e.to_string()),
            ManifestFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

pub fn load_manifest(path: impl AsRef<Path>) -> Result<ManifestNode, ManifestError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ManifestError::Missing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|source| ManifestError::Read { path: path.to_path_buf(), source })?;
    let format = ManifestFormat::from_path(path);
    let node = format
        .parse(&text)
        .map_err(|message| ManifestError::Parse { path: path.to_path_buf(), format, message })?;
    debug!(
        target: "manifest",
        path = %path.display(),
        ?format,
        root = node.kind(),
        "manifest loaded"
    );
    Ok(node)
}
