//! Job runner: background processing of submitted emails.
//!
//! Submissions create a pending record and push a `TriageJob` onto a
//! channel. A dispatcher task pulls jobs off the channel and runs each one
//! in its own task, bounded by a semaphore. Every job ends with exactly one
//! terminal write, including jobs whose processing panics and jobs that
//! could not be queued.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::store::JobStore;
use crate::error::{JobError, PipelineError};
use crate::pipeline::EmailProcessor;
use crate::pipeline::types::TriageOutcome;

/// One unit of background work.
#[derive(Debug, Clone)]
pub struct TriageJob {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

/// Handle for submitting jobs. Cheap to clone.
#[derive(Clone)]
pub struct JobRunner {
    tx: mpsc::UnboundedSender<TriageJob>,
    store: Arc<dyn JobStore>,
}

impl JobRunner {
    /// Start the dispatcher and return the submission handle along with the
    /// dispatcher's task handle.
    pub fn spawn(
        processor: Arc<EmailProcessor>,
        store: Arc<dyn JobStore>,
        max_concurrent_jobs: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(dispatch_loop(
            rx,
            processor,
            Arc::clone(&store),
            Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        ));
        (Self { tx, store }, handle)
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    /// Create a pending job and schedule it. Returns as soon as the record
    /// exists; processing happens in the background.
    pub async fn submit(&self, title: String, content: String) -> Result<Uuid, JobError> {
        let id = self.store.create().await?;
        info!(job_id = %id, "Job submitted");

        let job = TriageJob { id, title, content };
        if let Err(e) = self.tx.send(job) {
            let err = JobError::Dispatch {
                id,
                reason: e.to_string(),
            };
            error!(job_id = %id, error = %err, "Job queue closed, recording failure");
            finish(self.store.as_ref(), id, TriageOutcome::failed()).await;
        }
        Ok(id)
    }
}

async fn dispatch_loop(
    mut rx: mpsc::UnboundedReceiver<TriageJob>,
    processor: Arc<EmailProcessor>,
    store: Arc<dyn JobStore>,
    semaphore: Arc<Semaphore>,
) {
    while let Some(job) = rx.recv().await {
        // The semaphore is never closed, so this only waits for capacity.
        let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
        debug!(job_id = %job.id, "Job dispatched");

        let processor = Arc::clone(&processor);
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let _permit = permit;
            run_job(processor, store.as_ref(), job).await;
        });
    }
    debug!("Job queue closed, dispatcher exiting");
}

/// Process one job and write its terminal state.
async fn run_job(processor: Arc<EmailProcessor>, store: &dyn JobStore, job: TriageJob) {
    let id = job.id;
    let outcome = match execute(processor, job).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(job_id = %id, error = %e, "Job processing failed");
            TriageOutcome::failed()
        }
    };
    finish(store, id, outcome).await;
}

/// Run processing in its own task so a panic surfaces as a `JoinError`
/// instead of taking the terminal write down with it.
async fn execute(
    processor: Arc<EmailProcessor>,
    job: TriageJob,
) -> Result<TriageOutcome, PipelineError> {
    let handle = tokio::spawn(async move {
        processor.process(job.id, &job.title, &job.content).await
    });
    handle
        .await
        .map_err(|e| PipelineError::Internal(format!("processing task aborted: {e}")))
}

async fn finish(store: &dyn JobStore, id: Uuid, outcome: TriageOutcome) {
    if let Err(e) = store.set_done(id, outcome).await {
        error!(job_id = %id, error = %e, "Failed to record job result");
    }
}
