//! Persisted state of the previous run.
//!
//! This module records which tests failed and how long each test took, and
//! reads that record back at the start of the next run.

pub mod last_run;
pub mod tracker;

pub use last_run::{LastRunInfo, RunStatus};
pub use tracker::{LastRunTracker, LAST_RUN_FILE_NAME};
