//! Configuration, env-loaded and injected explicitly at construction.
//!
//! There are no process-wide mutable globals: the binary builds one
//! [`QuillConfig`] at startup and hands the relevant section to each
//! component. The configured timeouts should stay strictly smaller than any
//! outer invocation deadline (load balancer, gateway), otherwise the outer
//! layer aborts the call uncontrolled.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{QuillError, Result};
use crate::types::SamplingSettings;

pub const DEFAULT_MODEL_ID: &str = "meta.llama3-8b-instruct-v1:0";
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Generate a ~200 word blog on the topic: {topic}";
pub const DEFAULT_KEY_PREFIX: &str = "blog-output/";

/// Settings for the inference endpoint and the orchestrator wrapped around it.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the hosted text-generation service.
    pub base_url: String,
    /// Bearer token, if the endpoint requires one.
    pub api_key: Option<String>,
    /// Model identifier, interpolated into the invoke path.
    pub model_id: String,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// Full request/read timeout. Generative latency is highly variable;
    /// this is deliberately generous.
    pub request_timeout: Duration,
    /// Maximum transport attempts, including the first.
    pub max_attempts: u32,
    /// Instruction template with a `{topic}` placeholder.
    pub prompt_template: String,
    /// Default sampling parameters.
    pub sampling: SamplingSettings,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_attempts: 3,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            sampling: SamplingSettings::default(),
        }
    }
}

/// Which backend the artifact store talks to.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// S3-compatible HTTP object store at this endpoint.
    Http { endpoint: String },
    /// Files under a local root directory.
    Local { root: PathBuf },
}

/// Settings for artifact persistence.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub bucket: String,
    /// Folder prefix prepended to every derived key.
    pub key_prefix: String,
}

/// Bind address for the HTTP boundary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct QuillConfig {
    pub inference: InferenceConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl QuillConfig {
    /// Load from environment variables (QUILL_INFERENCE_URL, QUILL_BUCKET,
    /// etc.), reading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let base_url = require_env("QUILL_INFERENCE_URL")?;

        let inference = InferenceConfig {
            base_url,
            api_key: std::env::var("QUILL_INFERENCE_API_KEY").ok(),
            model_id: env_or("QUILL_MODEL_ID", DEFAULT_MODEL_ID),
            connect_timeout: Duration::from_secs(parse_env("QUILL_CONNECT_TIMEOUT_SECS", 10)?),
            request_timeout: Duration::from_secs(parse_env("QUILL_REQUEST_TIMEOUT_SECS", 300)?),
            max_attempts: parse_env("QUILL_MAX_ATTEMPTS", 3)?,
            prompt_template: env_or("QUILL_PROMPT_TEMPLATE", DEFAULT_PROMPT_TEMPLATE),
            sampling: SamplingSettings {
                max_tokens: parse_env("QUILL_MAX_TOKENS", 512)?,
                temperature: parse_env("QUILL_TEMPERATURE", 0.5)?,
            }
            .clamped(),
        };

        let backend = match env_or("QUILL_STORE", "local").as_str() {
            "http" => StoreBackend::Http {
                endpoint: require_env("QUILL_STORE_URL")?,
            },
            "local" => StoreBackend::Local {
                root: PathBuf::from(env_or("QUILL_STORE_DIR", "artifacts")),
            },
            other => {
                return Err(QuillError::Configuration(format!(
                    "QUILL_STORE must be 'http' or 'local', got '{other}'"
                )))
            }
        };

        let store = StoreConfig {
            backend,
            bucket: env_or("QUILL_BUCKET", "quill-blog-artifacts"),
            key_prefix: env_or("QUILL_KEY_PREFIX", DEFAULT_KEY_PREFIX),
        };

        let server = ServerConfig {
            host: env_or("QUILL_HOST", "0.0.0.0"),
            port: parse_env("QUILL_PORT", 8080)?,
        };

        Ok(Self {
            inference,
            store,
            server,
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn require_env(var: &str) -> Result<String> {
    std::env::var(var).map_err(|_| QuillError::Configuration(format!("{var} is not set")))
}

fn parse_env<T: std::str::FromStr>(var: &str, default: T) -> Result<T> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| QuillError::Configuration(format!("{var} has invalid value '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_defaults_match_service_contract() {
        let config = InferenceConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert_eq!(config.sampling.max_tokens, 512);
        assert_eq!(config.sampling.temperature, 0.5);
    }

    #[test]
    fn prompt_template_carries_topic_placeholder() {
        assert!(DEFAULT_PROMPT_TEMPLATE.contains("{topic}"));
    }

    #[test]
    fn parse_env_falls_back_to_default_when_unset() {
        let value: u32 = parse_env("QUILL_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
