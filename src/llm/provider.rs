//! Inference provider trait.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::pipeline::types::Classification;

/// Remote classification and reply drafting.
///
/// The two operations differ in failure policy: `classify` reports every
/// failure so the caller can fall back to the local heuristic, while
/// `generate_reply` substitutes the canned reply itself and only returns
/// an error when the request could not be sent at all.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Label the email as `Productive` or `Unproductive`.
    async fn classify(&self, content: &str) -> Result<Classification, LlmError>;

    /// Draft a reply for an email whose classification is already known.
    async fn generate_reply(
        &self,
        content: &str,
        classification: Classification,
    ) -> Result<String, LlmError>;
}

/// Map free text from the model onto the two-valued label.
///
/// Text that mentions neither label is treated as `Unproductive`.
pub fn interpret_label(text: &str) -> Classification {
    let lowered = text.trim().to_lowercase();
    if lowered.contains("productive") && !lowered.contains("unproductive") {
        Classification::Productive
    } else {
        Classification::Unproductive
    }
}
