//! Run observer lifecycle.
//!
//! The host runner notifies observers when a run begins (with the test tree)
//! and when it ends (with the overall result). Observers are driven from a
//! single task, one hook at a time.

use async_trait::async_trait;

use crate::suite::{RunResult, SharedSuite};

/// Protocol version an observer implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ObserverVersion {
    V2,
}

/// Receives run lifecycle events from the host.
#[async_trait]
pub trait RunObserver: Send {
    /// Protocol version this observer speaks.
    fn version(&self) -> ObserverVersion {
        ObserverVersion::V2
    }

    /// Whether the observer writes to stdout/stderr.
    fn prints_to_stdio(&self) -> bool {
        true
    }

    /// Called once before any test runs.
    async fn on_begin(&mut self, suite: SharedSuite);

    /// Called once after every test has finished.
    async fn on_end(&mut self, result: &RunResult);
}
