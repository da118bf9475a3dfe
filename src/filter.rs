//! Test selection predicates.
//!
//! A [`TestIdMatcher`] decides whether a test id is eligible for the current
//! run. Matchers are installed into [`RunConfig`](crate::config::RunConfig)
//! before test collection and consulted by the host during selection.

use std::collections::HashSet;
use std::fmt::Debug;

/// Predicate over test ids.
pub trait TestIdMatcher: Debug + Send + Sync {
    /// Whether the test with this id should run.
    fn is_eligible(&self, test_id: &str) -> bool;
}

/// Accepts every test. Used when no matcher is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllTests;

impl TestIdMatcher for AllTests {
    fn is_eligible(&self, _test_id: &str) -> bool {
        true
    }
}

/// Accepts only the tests that failed in the previous run.
#[derive(Debug, Clone, Default)]
pub struct FailedTestsMatcher {
    failed: HashSet<String>,
}

impl FailedTestsMatcher {
    pub fn new<I, S>(failed_tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failed: failed_tests.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of distinct failed ids.
    pub fn len(&self) -> usize {
        self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }
}

impl TestIdMatcher for FailedTestsMatcher {
    fn is_eligible(&self, test_id: &str) -> bool {
        self.failed.contains(test_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tests_accepts_everything() {
        assert!(AllTests.is_eligible("anything"));
        assert!(AllTests.is_eligible(""));
    }

    #[test]
    fn failed_matcher_accepts_only_failed_ids() {
        let matcher = FailedTestsMatcher::new(["a", "c"]);

        let eligible: Vec<&str> = ["a", "b", "c", "d"]
            .into_iter()
            .filter(|id| matcher.is_eligible(id))
            .collect();

        assert_eq!(eligible, vec!["a", "c"]);
    }

    #[test]
    fn failed_matcher_is_exact_match() {
        let matcher = FailedTestsMatcher::new(vec!["abc".to_string()]);
        assert!(!matcher.is_eligible("ab"));
        assert!(!matcher.is_eligible("abcd"));
        assert!(!matcher.is_eligible("ABC"));
    }

    #[test]
    fn empty_failed_matcher_rejects_everything() {
        let matcher = FailedTestsMatcher::new(Vec::<String>::new());
        assert!(matcher.is_empty());
        assert!(!matcher.is_eligible("a"));
    }
}
