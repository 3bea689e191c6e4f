//! Job store: volatile map from job id to lifecycle record.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::JobRecord;
use crate::error::JobError;
use crate::pipeline::types::TriageOutcome;

/// Backend-agnostic job store.
///
/// A record is visible as pending as soon as `create` returns and moves to
/// done exactly once through `set_done`. Records are never deleted.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new pending record and return its id.
    async fn create(&self) -> Result<Uuid, JobError>;

    /// Look up a record. Ids that are unknown or not valid ids are `NotFound`.
    async fn get(&self, id: &str) -> Result<JobRecord, JobError>;

    /// Replace a pending record with its completed form in one step.
    async fn set_done(&self, id: Uuid, outcome: TriageOutcome) -> Result<(), JobError>;
}

/// In-memory job store. Safe for concurrent use across tasks.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, JobRecord>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records (all statuses).
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self) -> Result<Uuid, JobError> {
        let id = Uuid::new_v4();
        self.jobs.write().await.insert(id, JobRecord::pending(id));
        debug!(job_id = %id, "Job created");
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<JobRecord, JobError> {
        let not_found = || JobError::NotFound { id: id.to_string() };
        let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
        self.jobs.read().await.get(&uuid).cloned().ok_or_else(not_found)
    }

    async fn set_done(&self, id: Uuid, outcome: TriageOutcome) -> Result<(), JobError> {
        let mut jobs = self.jobs.write().await;
        let record = jobs.get_mut(&id).ok_or_else(|| JobError::NotFound {
            id: id.to_string(),
        })?;

        if record.is_done() {
            return Err(JobError::AlreadyCompleted { id });
        }

        let classification = outcome.classification;
        *record = record.completed(outcome);
        info!(job_id = %id, classification = %classification, "Job done");
        Ok(())
    }
}
