//! Test tree handed to run observers.
//!
//! A [`Suite`] is a tree of nested suites and [`TestCase`]s in declaration
//! order. Each test carries the [`TestAttempt`]s recorded while the run was in
//! progress, one per retry.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::state::RunStatus;

/// Suite handle shared between the host runner and its observers.
///
/// The host keeps appending attempts while tests run; observers read it once
/// the run is over.
pub type SharedSuite = Arc<RwLock<Suite>>;

/// Status of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    #[default]
    Passed,
    Failed,
    TimedOut,
    Skipped,
    Interrupted,
}

/// Classification of a test across all its attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// Every counted attempt ended with the expected status.
    Expected,
    /// Every counted attempt ended with an unexpected status.
    Unexpected,
    /// Some attempts failed, at least one succeeded.
    Flaky,
    /// Nothing ran.
    Skipped,
}

/// One execution of a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAttempt {
    /// Retry index, 0 for the first attempt.
    pub retry: u32,
    pub status: TestStatus,
    /// Wall time of this attempt in milliseconds.
    pub duration_ms: u64,
}

impl TestAttempt {
    pub fn new(retry: u32, status: TestStatus, duration_ms: u64) -> Self {
        Self {
            retry,
            status,
            duration_ms,
        }
    }
}

/// A single test and the attempts recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Stable identifier, opaque to this crate.
    pub id: String,
    pub title: String,
    /// Status the test is expected to end with (usually `Passed`).
    #[serde(default)]
    pub expected_status: TestStatus,
    #[serde(default)]
    pub attempts: Vec<TestAttempt>,
}

impl TestCase {
    /// Create a test that is expected to pass and has no attempts yet.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            expected_status: TestStatus::Passed,
            attempts: Vec::new(),
        }
    }

    /// Set the expected status.
    pub fn expecting(mut self, status: TestStatus) -> Self {
        self.expected_status = status;
        self
    }

    /// Append an attempt with the next retry index.
    pub fn record_attempt(&mut self, status: TestStatus, duration_ms: u64) {
        let retry = u32::try_from(self.attempts.len()).unwrap_or(u32::MAX);
        self.attempts.push(TestAttempt::new(retry, status, duration_ms));
    }

    /// Classify the test from its attempts.
    ///
    /// Leading skipped or interrupted attempts are ignored. Skipped and
    /// interrupted attempts never count as failures.
    pub fn outcome(&self) -> TestOutcome {
        let counted: Vec<&TestAttempt> = self
            .attempts
            .iter()
            .skip_while(|a| matches!(a.status, TestStatus::Skipped | TestStatus::Interrupted))
            .collect();

        if counted.is_empty() {
            return TestOutcome::Skipped;
        }

        let failures = counted
            .iter()
            .filter(|a| {
                !matches!(a.status, TestStatus::Skipped | TestStatus::Interrupted)
                    && a.status != self.expected_status
            })
            .count();

        if failures == 0 {
            TestOutcome::Expected
        } else if failures == counted.len() {
            TestOutcome::Unexpected
        } else {
            TestOutcome::Flaky
        }
    }

    /// Whether the test counts as passing. Flaky and skipped tests do.
    pub fn ok(&self) -> bool {
        !matches!(self.outcome(), TestOutcome::Unexpected)
    }

    /// Sum of all attempt durations, retries included. Saturates at `u64::MAX`.
    pub fn total_duration_ms(&self) -> u64 {
        self.attempts
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.duration_ms))
    }
}

/// Entry of a suite, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteEntry {
    Suite(Suite),
    Test(TestCase),
}

/// A group of tests and nested suites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<SuiteEntry>,
}

impl Suite {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style helper to append a test.
    pub fn with_test(mut self, test: TestCase) -> Self {
        self.entries.push(SuiteEntry::Test(test));
        self
    }

    /// Builder-style helper to append a nested suite.
    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.entries.push(SuiteEntry::Suite(suite));
        self
    }

    /// Wrap the suite in a handle that can be shared with observers.
    pub fn into_shared(self) -> SharedSuite {
        Arc::new(RwLock::new(self))
    }

    /// All tests in the tree, depth-first in declaration order.
    pub fn all_tests(&self) -> Vec<&TestCase> {
        let mut tests = Vec::new();
        self.collect_tests(&mut tests);
        tests
    }

    fn collect_tests<'a>(&'a self, out: &mut Vec<&'a TestCase>) {
        for entry in &self.entries {
            match entry {
                SuiteEntry::Suite(suite) => suite.collect_tests(out),
                SuiteEntry::Test(test) => out.push(test),
            }
        }
    }

    /// Find a test anywhere in the tree by id.
    pub fn test_mut(&mut self, id: &str) -> Option<&mut TestCase> {
        self.entries.iter_mut().find_map(|entry| match entry {
            SuiteEntry::Suite(suite) => suite.test_mut(id),
            SuiteEntry::Test(test) if test.id == id => Some(test),
            SuiteEntry::Test(_) => None,
        })
    }
}

/// Overall result of a run, passed to observers at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub status: RunStatus,
}

impl RunResult {
    pub fn new(status: RunStatus) -> Self {
        Self { status }
    }
}
