//! Convenience re-exports for common use.

pub use crate::config::QuillConfig;
pub use crate::error::{ErrorKind, QuillError, Result};
pub use crate::inference::{InferenceClient, InferenceRequest, InferenceResponse};
pub use crate::orchestrator::RequestOrchestrator;
pub use crate::store::{ArtifactPersister, ArtifactStore, PersistOutcome};
pub use crate::types::{Artifact, GeneratedBlog, GenerationRequest, SamplingSettings};
