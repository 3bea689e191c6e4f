//! Job lifecycle: records, the volatile store, and the background runner.

pub mod model;
pub mod runner;
pub mod store;

pub use model::{JobRecord, JobStatus, JobView};
pub use runner::{JobRunner, TriageJob};
pub use store::{InMemoryJobStore, JobStore};
