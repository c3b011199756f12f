//! Artifact output configuration.
//! Owns the artifacts root directory that exported figures are written under.

use crate::error::ChartResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where exported figures land. Images go to `<artifacts_path>/images/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub artifacts_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            artifacts_path: PathBuf::from("artifacts"),
        }
    }
}

impl ArtifactConfig {
    pub fn new(artifacts_path: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_path: artifacts_path.into(),
        }
    }

    /// Load from a JSON file of the form `{"artifacts_path": "..."}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| crate::error::ChartError::InvalidRequest(format!("bad config: {e}")))
    }

    pub fn images_dir(&self) -> PathBuf {
        self.artifacts_path.join("images")
    }

    /// Full destination path for a named image, `.png` appended.
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.images_dir().join(format!("{filename}.png"))
    }
}
