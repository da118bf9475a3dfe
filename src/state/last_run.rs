//! The persisted record of the previous run.
//!
//! [`LastRunInfo`] is written once at the end of every run and replaced in
//! full by the next one. It is never updated in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::suite::Suite;

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Passed,
    Failed,
    TimedOut,
    Interrupted,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::TimedOut => "timedout",
            Self::Interrupted => "interrupted",
        };
        f.write_str(label)
    }
}

/// Outcome of the last completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRunInfo {
    /// Overall status.
    pub status: RunStatus,

    /// Ids of tests that did not pass, in tree order.
    pub failed_tests: Vec<String>,

    /// Total duration in milliseconds for every test, retries included.
    #[serde(default)]
    pub test_durations: BTreeMap<String, u64>,
}

impl LastRunInfo {
    /// Build the record for a finished run.
    pub fn from_suite(suite: &Suite, status: RunStatus) -> Self {
        let tests = suite.all_tests();

        let failed_tests = tests
            .iter()
            .filter(|t| !t.ok())
            .map(|t| t.id.clone())
            .collect();

        let test_durations = tests
            .iter()
            .map(|t| (t.id.clone(), t.total_duration_ms()))
            .collect();

        Self {
            status,
            failed_tests,
            test_durations,
        }
    }

    /// Record for a run whose test tree was never seen.
    pub fn empty(status: RunStatus) -> Self {
        Self {
            status,
            failed_tests: Vec::new(),
            test_durations: BTreeMap::new(),
        }
    }

    /// Parse a state file's content.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Human-readable JSON, as written to the state file.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sum of all recorded test durations. Saturates at `u64::MAX`.
    pub fn total_duration_ms(&self) -> u64 {
        self.test_durations
            .values()
            .fold(0u64, |acc, ms| acc.saturating_add(*ms))
    }

    /// The `limit` slowest tests, slowest first. Ties keep id order.
    pub fn slowest(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .test_durations
            .iter()
            .map(|(id, ms)| (id.as_str(), *ms))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}
