//! Email processor: classifies a submitted email and drafts a reply.
//!
//! Flow:
//! 1. Normalize title + content (input for the local fallback only)
//! 2. Remote classification on the raw content → heuristic on failure
//! 3. Remote reply for the chosen label → canned reply on failure
//!
//! Remote failures never escape `process`; the caller only ever sees a
//! two-valued classification and a non-empty reply.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm::InferenceProvider;
use crate::pipeline::heuristic::classify_heuristic;
use crate::pipeline::normalize::normalize;
use crate::pipeline::types::{Classification, TriageOutcome};

/// Triage orchestrator for one email at a time. Stateless between calls.
pub struct EmailProcessor {
    llm: Arc<dyn InferenceProvider>,
    fallback_delay: Duration,
}

impl EmailProcessor {
    pub fn new(llm: Arc<dyn InferenceProvider>, fallback_delay: Duration) -> Self {
        Self {
            llm,
            fallback_delay,
        }
    }

    /// Process one email through the full pipeline.
    pub async fn process(&self, job_id: Uuid, title: &str, content: &str) -> TriageOutcome {
        info!(job_id = %job_id, provider = self.llm.name(), "Processing email");

        let tokens = normalize(&format!("{title}\n\n{content}"));
        let classification = self.classify(job_id, content, &tokens).await;
        let suggested_reply = self.suggest_reply(job_id, content, classification).await;

        TriageOutcome {
            classification,
            suggested_reply,
        }
    }

    /// Remote label, or the keyword heuristic when the remote call fails.
    async fn classify(&self, job_id: Uuid, content: &str, tokens: &[String]) -> Classification {
        match self.llm.classify(content).await {
            Ok(label) => {
                debug!(job_id = %job_id, label = %label, "Remote classification succeeded");
                label
            }
            Err(e) => {
                let label = classify_heuristic(tokens);
                warn!(
                    job_id = %job_id,
                    error = %e,
                    label = %label,
                    "Remote classification failed, using keyword heuristic"
                );
                label
            }
        }
    }

    /// Remote reply, or the canned reply after a short pause.
    async fn suggest_reply(
        &self,
        job_id: Uuid,
        content: &str,
        classification: Classification,
    ) -> String {
        match self.llm.generate_reply(content, classification).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    job_id = %job_id,
                    error = %e,
                    "Reply generation failed, using canned reply"
                );
                tokio::time::sleep(self.fallback_delay).await;
                classification.canned_reply().to_string()
            }
        }
    }
}
