//! Filesystem-backed artifact store.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Artifact;

use super::ArtifactStore;

/// Stores artifacts as files under `root/bucket/key`.
///
/// Keys contain `/` separators (and `:` from the timestamp), so parent
/// directories are created on demand.
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, artifact: &Artifact) -> Result<()> {
        let path = self.root.join(&artifact.bucket).join(&artifact.key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, artifact.body.as_bytes()).await?;
        Ok(())
    }
}
