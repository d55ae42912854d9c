//! Inference client trait and wire types.

pub mod http;

pub use http::HttpInferenceClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single invocation of the text-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Instruction text, before any model-specific chat envelope.
    pub prompt: String,
    pub max_gen_len: u32,
    pub temperature: f64,
}

/// Text extracted from a successful inference response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub text: String,
}

/// Boundary to the hosted text-generation service.
///
/// Implementations classify every failure into a [`crate::error::QuillError`];
/// callers decide retry behavior from [`crate::error::QuillError::kind`].
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// The model ID this client invokes.
    fn model_id(&self) -> &str;

    /// Invoke the endpoint once. No internal retries.
    async fn invoke(&self, request: &InferenceRequest) -> Result<InferenceResponse>;
}
