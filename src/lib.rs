//! Quill — blog generation service core.
//!
//! Turns a topic into generated text by invoking a hosted text-generation
//! endpoint, persists the result to an object store best-effort, and exposes
//! the flow over a small JSON HTTP API.
//!
//! # Quick Start
//!
//! ```no_run
//! use quill::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> quill::error::Result<()> {
//! let config = QuillConfig::from_env()?;
//! let client = quill::inference::HttpInferenceClient::new(&config.inference)?;
//! let orchestrator = RequestOrchestrator::new(Arc::new(client), &config.inference);
//! let blog = orchestrator.generate("rust memory safety").await?;
//! println!("{}", blog.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod orchestrator;
pub mod prelude;
pub mod server;
pub mod store;
pub mod types;
pub mod util;
