//! Artifact persistence: store trait, key derivation, best-effort writes.

pub mod http;
pub mod local;

pub use http::HttpArtifactStore;
pub use local::LocalArtifactStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::types::Artifact;

/// Blob store boundary (S3-compatible HTTP service or local filesystem).
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write the artifact. One attempt; the persister handles failure.
    async fn put(&self, artifact: &Artifact) -> Result<()>;
}

/// Outcome of a persistence attempt. Never an error to the caller: a failed
/// write is reported operationally and must not downgrade a successful
/// generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored { key: String },
    Failed { message: String },
}

impl PersistOutcome {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Stored { key } => Some(key),
            Self::Failed { .. } => None,
        }
    }
}

/// Writes generated text under a deterministic, collision-resistant key.
pub struct ArtifactPersister {
    store: Arc<dyn ArtifactStore>,
    bucket: String,
    key_prefix: String,
}

impl ArtifactPersister {
    pub fn new(store: Arc<dyn ArtifactStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
        }
    }

    /// Persist generated text, keyed by generation time.
    ///
    /// A single write attempt; any store error becomes
    /// [`PersistOutcome::Failed`] and is logged, never propagated.
    pub async fn persist(&self, text: &str, generated_at: DateTime<Utc>) -> PersistOutcome {
        let artifact = Artifact {
            bucket: self.bucket.clone(),
            key: self.derive_key(generated_at),
            body: text.to_string(),
        };

        match self.store.put(&artifact).await {
            Ok(()) => {
                info!(bucket = %artifact.bucket, key = %artifact.key, "artifact stored");
                PersistOutcome::Stored { key: artifact.key }
            }
            Err(e) => {
                error!(bucket = %artifact.bucket, key = %artifact.key, error = %e, "artifact write failed");
                PersistOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Derive the storage key from the generation timestamp.
    ///
    /// Deterministic for a fixed timestamp. Microsecond resolution keeps
    /// concurrent same-second invocations from overwriting each other.
    pub fn derive_key(&self, generated_at: DateTime<Utc>) -> String {
        format!(
            "{}blog_{}.txt",
            self.key_prefix,
            generated_at.format("%H:%M:%S%.6f")
        )
    }
}
