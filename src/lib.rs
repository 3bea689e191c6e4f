//! Mail triage: email classification and reply suggestions.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod llm;
pub mod pipeline;
