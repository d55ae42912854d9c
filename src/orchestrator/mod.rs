//! Request orchestration: prompt construction, retried inference, outcome
//! classification.

use std::sync::Arc;

use tracing::debug;

use crate::config::InferenceConfig;
use crate::error::Result;
use crate::inference::{InferenceClient, InferenceRequest};
use crate::types::{GeneratedBlog, GenerationRequest, SamplingSettings};
use crate::util::RetryPolicy;

/// Turns a topic into generated text.
///
/// One call moves Idle → Requesting → {Succeeded, Failed}; the retry loop is
/// internal to Requesting and only re-runs transport-level failures. Every
/// failure path comes back as a classified [`crate::error::QuillError`] —
/// nothing panics across this boundary.
pub struct RequestOrchestrator {
    client: Arc<dyn InferenceClient>,
    retry: RetryPolicy,
    prompt_template: String,
    sampling: SamplingSettings,
}

impl RequestOrchestrator {
    pub fn new(client: Arc<dyn InferenceClient>, config: &InferenceConfig) -> Self {
        Self {
            client,
            retry: RetryPolicy::with_max_attempts(config.max_attempts),
            prompt_template: config.prompt_template.clone(),
            sampling: config.sampling.clone().clamped(),
        }
    }

    /// Generate text for a topic.
    ///
    /// The HTTP boundary rejects empty topics before calling; an empty topic
    /// still fails validation here for library callers.
    pub async fn generate(&self, topic: &str) -> Result<GeneratedBlog> {
        let request = GenerationRequest::with_settings(topic, self.sampling.clone())?;
        let prompt = self.build_prompt(&request);

        let invocation = InferenceRequest {
            prompt,
            max_gen_len: request.settings.max_tokens,
            temperature: request.settings.temperature,
        };

        debug!(model = self.client.model_id(), "generate: calling inference");
        let response = self
            .retry
            .execute(|| self.client.invoke(&invocation))
            .await?;

        Ok(GeneratedBlog {
            text: response.text,
        })
    }

    fn build_prompt(&self, request: &GenerationRequest) -> String {
        self.prompt_template.replace("{topic}", request.topic())
    }
}
