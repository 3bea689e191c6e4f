//! Remote inference for mail triage.
//!
//! The `InferenceProvider` trait is the seam between the pipeline and the
//! external generative-language service. `GeminiClient` is the only
//! production implementation; tests substitute stubs.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiClient;
pub use provider::{InferenceProvider, interpret_label};

use std::sync::Arc;

use tracing::info;

use crate::config::LlmConfig;
use crate::error::ConfigError;

/// Create the inference provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn InferenceProvider>, ConfigError> {
    let client = GeminiClient::new(config)?;
    if config.api_key.is_some() {
        info!("Using Gemini (model: {})", client.model());
    } else {
        info!("GEMINI_API_KEY not set, classification uses local heuristics only");
    }
    Ok(Arc::new(client))
}
