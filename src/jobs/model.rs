//! Job record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::types::{Classification, TriageOutcome};

/// Lifecycle status of a job. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Done,
}

/// One submitted email's processing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: Uuid,
    pub status: JobStatus,
    /// Present exactly when `status` is `Done`.
    pub outcome: Option<TriageOutcome>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn pending(id: Uuid) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
            outcome: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Completed copy of this record.
    pub fn completed(&self, outcome: TriageOutcome) -> Self {
        Self {
            id: self.id,
            status: JobStatus::Done,
            outcome: Some(outcome),
            created_at: self.created_at,
            completed_at: Some(Utc::now()),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == JobStatus::Done
    }

    /// Client-facing view. Pending jobs expose only id and status.
    pub fn view(&self) -> JobView {
        let (classification, suggested_reply) = match (&self.status, &self.outcome) {
            (JobStatus::Done, Some(outcome)) => (
                Some(outcome.classification),
                Some(outcome.suggested_reply.clone()),
            ),
            _ => (None, None),
        };
        JobView {
            id: self.id.to_string(),
            status: self.status,
            classification,
            suggested_reply,
        }
    }
}

/// Wire shape of a status query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobView {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_reply: Option<String>,
}
