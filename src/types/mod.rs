//! Core value types: generation requests, results, and artifacts.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};

/// Sampling parameters forwarded to the inference endpoint.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Maximum number of tokens the model may generate.
    #[builder(default = 512)]
    pub max_tokens: u32,
    /// Output randomness in [0, 1]; lower is more focused.
    #[builder(default = 0.5)]
    pub temperature: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.5,
        }
    }
}

impl SamplingSettings {
    /// Clamp temperature into the valid [0, 1] range.
    pub fn clamped(mut self) -> Self {
        self.temperature = self.temperature.clamp(0.0, 1.0);
        self
    }
}

/// A validated request for one generation call.
///
/// The topic is trimmed at construction; an empty topic fails validation
/// rather than reaching the inference endpoint.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    topic: String,
    pub settings: SamplingSettings,
}

impl GenerationRequest {
    pub fn new(topic: &str) -> Result<Self> {
        Self::with_settings(topic, SamplingSettings::default())
    }

    pub fn with_settings(topic: &str, settings: SamplingSettings) -> Result<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuillError::Validation("Blog topic is required.".into()));
        }
        Ok(Self {
            topic: topic.to_string(),
            settings: settings.clamped(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// A successfully generated blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBlog {
    pub text: String,
}

/// A persisted copy of generated text, identified by a derived key.
///
/// Constructed only after a successful generation and consumed by a single
/// write attempt; there is no update or delete path.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bucket: String,
    pub key: String,
    pub body: String,
}
