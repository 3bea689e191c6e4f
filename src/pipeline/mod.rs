//! Email triage pipeline.
//!
//! Every submitted email flows through:
//! 1. `normalize`: tokens for the local fallback
//! 2. `InferenceProvider::classify`: remote label, `heuristic` on failure
//! 3. `InferenceProvider::generate_reply`: remote draft, canned on failure

pub mod heuristic;
pub mod normalize;
pub mod processor;
pub mod types;

pub use processor::EmailProcessor;
pub use types::{Classification, TriageOutcome};
