//! Shared types for the triage pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reply used when a productive email gets no generated draft.
pub const PRODUCTIVE_CANNED_REPLY: &str =
    "Thanks for the message. I will review and follow up with next steps shortly.";

/// Reply used when an unproductive email gets no generated draft.
pub const UNPRODUCTIVE_CANNED_REPLY: &str = "No response recommended.";

/// Reply recorded when processing fails unexpectedly.
pub const ERROR_REPLY: &str = "Processing failed. Please retry.";

// ── Classification ──────────────────────────────────────────────────

/// Label attached to a finished job.
///
/// Successful paths only ever produce `Productive` or `Unproductive`.
/// `Error` is reserved for jobs whose processing failed unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Productive,
    Unproductive,
    Error,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "Productive",
            Self::Unproductive => "Unproductive",
            Self::Error => "Error",
        }
    }

    /// Canned reply keyed by classification.
    pub fn canned_reply(&self) -> &'static str {
        match self {
            Self::Productive => PRODUCTIVE_CANNED_REPLY,
            Self::Unproductive => UNPRODUCTIVE_CANNED_REPLY,
            Self::Error => ERROR_REPLY,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Triage outcome ──────────────────────────────────────────────────

/// Final result of processing one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub classification: Classification,
    pub suggested_reply: String,
}

impl TriageOutcome {
    /// Outcome recorded when processing failed unexpectedly.
    pub fn failed() -> Self {
        Self {
            classification: Classification::Error,
            suggested_reply: ERROR_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_replies_by_label() {
        assert_eq!(
            Classification::Productive.canned_reply(),
            "Thanks for the message. I will review and follow up with next steps shortly."
        );
        assert_eq!(
            Classification::Unproductive.canned_reply(),
            "No response recommended."
        );
    }

    #[test]
    fn classification_serializes_as_label() {
        let json = serde_json::to_value(Classification::Unproductive).unwrap();
        assert_eq!(json, "Unproductive");
        assert_eq!(Classification::Error.to_string(), "Error");
    }

    #[test]
    fn failed_outcome() {
        let outcome = TriageOutcome::failed();
        assert_eq!(outcome.classification, Classification::Error);
        assert_eq!(outcome.suggested_reply, "Processing failed. Please retry.");
    }
}
