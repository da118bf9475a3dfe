//! lastrun - Remember the outcome of the previous test run.
//!
//! A test runner uses this crate to record which tests failed and how long
//! each test took, then to restrict the next run to the failures.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface for inspecting the last run
//! - [`config`] - Run configuration, config file loading and project selection
//! - [`error`] - Error types and result aliases
//! - [`filter`] - Test id predicates installed before test selection
//! - [`observer`] - Run lifecycle hooks
//! - [`state`] - The persisted last-run record and its tracker
//! - [`suite`] - Test tree handed to observers
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use lastrun::config::RunConfig;
//! use lastrun::observer::RunObserver;
//! use lastrun::state::{LastRunTracker, RunStatus};
//! use lastrun::suite::{RunResult, Suite, TestCase, TestStatus};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let dir = tempfile::TempDir::new().unwrap();
//! let mut config = RunConfig {
//!     last_run_file: Some(dir.path().join(".last-run.json")),
//!     ..RunConfig::default()
//! };
//!
//! // First run: one test fails.
//! let mut tracker = LastRunTracker::new(&config);
//! let mut broken = TestCase::new("math::div", "divides");
//! broken.record_attempt(TestStatus::Failed, 12);
//! tracker.on_begin(Suite::new("root").with_test(broken).into_shared()).await;
//! tracker.on_end(&RunResult::new(RunStatus::Failed)).await;
//!
//! // Next run: only the failure is eligible.
//! let tracker = LastRunTracker::new(&config);
//! tracker.filter_last_failed(&mut config).await;
//! assert!(config.is_test_eligible("math::div"));
//! assert!(!config.is_test_eligible("math::add"));
//! # });
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod observer;
pub mod state;
pub mod suite;
pub mod ui;

pub use error::{LastRunError, Result};
