//! Last-run state tracking.
//!
//! [`LastRunTracker`] remembers which tests failed and how long every test
//! took, so the next run can rerun only the failures. It is built once per
//! run, before test collection, and observes the run through
//! [`RunObserver`].
//!
//! Tracking is best effort. A missing or corrupt state file reads as "no
//! previous run", and write failures are logged, never returned.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};
use tokio::fs;

use crate::config::{filter_projects, RunConfig};
use crate::error::{LastRunError, Result};
use crate::filter::FailedTestsMatcher;
use crate::observer::{ObserverVersion, RunObserver};
use crate::suite::{RunResult, SharedSuite};

use super::LastRunInfo;

/// File name of the state file inside a project's output directory.
pub const LAST_RUN_FILE_NAME: &str = ".last-run.json";

/// Records the outcome of each run and serves it back to the next one.
///
/// Call [`filter_last_failed`](Self::filter_last_failed) (if at all) before
/// test selection, and let the host deliver `on_begin`/`on_end` exactly once.
/// Neither ordering is enforced here.
#[derive(Debug)]
pub struct LastRunTracker {
    last_run_file: Option<PathBuf>,
    list_only: bool,
    suite: Option<SharedSuite>,
}

impl LastRunTracker {
    /// Create a tracker for the given run configuration.
    ///
    /// The state file path is resolved here and never changes afterwards.
    pub fn new(config: &RunConfig) -> Self {
        let last_run_file = Self::resolve_path(config);
        match &last_run_file {
            Some(path) => tracing::debug!("Tracking last run in {}", path.display()),
            None => tracing::debug!("No last-run file could be resolved; tracking disabled"),
        }

        Self {
            last_run_file,
            list_only: config.list_only,
            suite: None,
        }
    }

    /// Work out where the state file lives.
    ///
    /// An explicit path wins. Otherwise the first selected project's output
    /// directory is used. A project filter that names unknown projects
    /// disables tracking rather than failing.
    pub fn resolve_path(config: &RunConfig) -> Option<PathBuf> {
        if let Some(path) = &config.last_run_file {
            return Some(path.clone());
        }

        match filter_projects(&config.projects, config.cli_project_filter.as_deref()) {
            Ok(selected) => selected
                .first()
                .map(|project| project.output_dir.join(LAST_RUN_FILE_NAME)),
            Err(e) => {
                tracing::debug!("Cannot derive last-run file: {}", e);
                None
            }
        }
    }

    /// Path of the state file, if one was resolved.
    pub fn last_run_file(&self) -> Option<&Path> {
        self.last_run_file.as_deref()
    }

    /// Load the record of the previous run.
    ///
    /// Returns `None` when no path is resolved or the file cannot be read or
    /// parsed.
    pub async fn last_run_info(&self) -> Option<LastRunInfo> {
        let path = self.last_run_file.as_ref()?;

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No previous run at {}: {}", path.display(), e);
                return None;
            }
        };

        match LastRunInfo::from_json(&content) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("Ignoring unreadable last-run file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Restrict selection to the tests that failed in the previous run.
    ///
    /// Leaves `config` untouched when there is no previous run.
    pub async fn filter_last_failed(&self, config: &mut RunConfig) {
        let Some(info) = self.last_run_info().await else {
            return;
        };

        let matcher = FailedTestsMatcher::new(info.failed_tests);
        if matcher.is_empty() {
            tracing::info!("No tests failed last time; nothing to rerun");
        } else {
            tracing::info!("Rerunning {} test(s) that failed last time", matcher.len());
        }
        config.test_id_matcher = Some(Arc::new(matcher));
    }

    /// Install the failed-test filter if the run asked for `last_failed`.
    pub async fn prepare_selection(&self, config: &mut RunConfig) {
        if config.last_failed {
            self.filter_last_failed(config).await;
        }
    }

    fn snapshot(&self, result: &RunResult) -> LastRunInfo {
        match &self.suite {
            Some(suite) => {
                let suite = suite.read().unwrap_or_else(PoisonError::into_inner);
                LastRunInfo::from_suite(&suite, result.status)
            }
            None => LastRunInfo::empty(result.status),
        }
    }

    async fn write_last_run(path: &Path, info: &LastRunInfo) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| LastRunError::io(dir, e))?;
        }

        let content = info.to_json_pretty()?;
        fs::write(path, content)
            .await
            .map_err(|e| LastRunError::io(path, e))?;

        Ok(())
    }
}

#[async_trait]
impl RunObserver for LastRunTracker {
    fn version(&self) -> ObserverVersion {
        ObserverVersion::V2
    }

    fn prints_to_stdio(&self) -> bool {
        false
    }

    async fn on_begin(&mut self, suite: SharedSuite) {
        self.suite = Some(suite);
    }

    async fn on_end(&mut self, result: &RunResult) {
        let Some(path) = self.last_run_file.as_deref() else {
            return;
        };
        if self.list_only {
            tracing::debug!("List-only run, not recording last run");
            return;
        }

        let info = self.snapshot(result);
        match Self::write_last_run(path, &info).await {
            Ok(()) => tracing::debug!(
                "Recorded last run ({}, {} failed) to {}",
                info.status,
                info.failed_tests.len(),
                path.display()
            ),
            Err(e) => tracing::warn!("Failed to record last run: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::state::RunStatus;
    use crate::suite::{Suite, TestCase, TestStatus};
    use tempfile::TempDir;

    fn config_with_file(path: PathBuf) -> RunConfig {
        RunConfig {
            last_run_file: Some(path),
            ..RunConfig::default()
        }
    }

    fn test_case(id: &str, attempts: &[(TestStatus, u64)]) -> TestCase {
        let mut test = TestCase::new(id, id);
        for (status, ms) in attempts {
            test.record_attempt(*status, *ms);
        }
        test
    }

    fn suite_of(tests: Vec<TestCase>) -> SharedSuite {
        tests
            .into_iter()
            .fold(Suite::new("root"), Suite::with_test)
            .into_shared()
    }

    async fn record(tracker: &mut LastRunTracker, suite: SharedSuite, status: RunStatus) {
        tracker.on_begin(suite).await;
        tracker.on_end(&RunResult::new(status)).await;
    }

    #[test]
    fn explicit_path_wins_over_projects() {
        let config = RunConfig {
            last_run_file: Some(PathBuf::from("/explicit/state.json")),
            projects: vec![ProjectConfig::new("unit", "/out/unit")],
            ..RunConfig::default()
        };
        let tracker = LastRunTracker::new(&config);
        assert_eq!(
            tracker.last_run_file(),
            Some(Path::new("/explicit/state.json"))
        );
    }

    #[test]
    fn path_derives_from_first_selected_project() {
        let config = RunConfig {
            projects: vec![
                ProjectConfig::new("unit", "/out/unit"),
                ProjectConfig::new("e2e", "/out/e2e"),
            ],
            ..RunConfig::default()
        };
        assert_eq!(
            LastRunTracker::resolve_path(&config),
            Some(PathBuf::from("/out/unit/.last-run.json"))
        );

        let config = RunConfig {
            cli_project_filter: Some(vec!["E2E".to_string()]),
            ..config
        };
        assert_eq!(
            LastRunTracker::resolve_path(&config),
            Some(PathBuf::from("/out/e2e/.last-run.json"))
        );
    }

    #[test]
    fn unknown_project_disables_tracking() {
        let config = RunConfig {
            projects: vec![ProjectConfig::new("unit", "/out/unit")],
            cli_project_filter: Some(vec!["nope".to_string()]),
            ..RunConfig::default()
        };
        assert!(LastRunTracker::resolve_path(&config).is_none());
    }

    #[test]
    fn tracker_is_silent_v2_observer() {
        let tracker = LastRunTracker::new(&RunConfig::default());
        assert_eq!(tracker.version(), ObserverVersion::V2);
        assert!(!tracker.prints_to_stdio());
    }

    #[tokio::test]
    async fn round_trip_preserves_status_and_failures() {
        let temp = TempDir::new().unwrap();
        let config = config_with_file(temp.path().join(LAST_RUN_FILE_NAME));
        let mut tracker = LastRunTracker::new(&config);

        let suite = suite_of(vec![
            test_case("a", &[(TestStatus::Failed, 10)]),
            test_case("b", &[(TestStatus::Passed, 20)]),
            test_case("c", &[(TestStatus::TimedOut, 30)]),
        ]);
        record(&mut tracker, suite, RunStatus::Failed).await;

        let info = LastRunTracker::new(&config).last_run_info().await.unwrap();
        assert_eq!(info.status, RunStatus::Failed);
        assert_eq!(info.failed_tests, vec!["a", "c"]);
        assert_eq!(info.test_durations["b"], 20);
    }

    #[tokio::test]
    async fn durations_sum_retries() {
        let temp = TempDir::new().unwrap();
        let config = config_with_file(temp.path().join("state.json"));
        let mut tracker = LastRunTracker::new(&config);

        let suite = suite_of(vec![test_case(
            "retried",
            &[
                (TestStatus::Failed, 100),
                (TestStatus::Failed, 50),
                (TestStatus::Passed, 200),
            ],
        )]);
        record(&mut tracker, suite, RunStatus::Passed).await;

        let info = tracker.last_run_info().await.unwrap();
        assert_eq!(info.test_durations["retried"], 350);
        assert!(info.failed_tests.is_empty());
    }

    #[tokio::test]
    async fn record_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deep").join("nested").join("state.json");
        let mut tracker = LastRunTracker::new(&config_with_file(path.clone()));

        record(&mut tracker, suite_of(Vec::new()), RunStatus::Passed).await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn corrupt_files_read_as_no_previous_run() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let tracker = LastRunTracker::new(&config_with_file(path.clone()));

        assert!(tracker.last_run_info().await.is_none());

        for content in [
            "",
            "{\"status\": \"failed\", \"failedTe",
            "{\"hello\": \"world\"}",
            "[\"a\", \"b\"]",
            "not json at all",
        ] {
            std::fs::write(&path, content).unwrap();
            assert!(
                tracker.last_run_info().await.is_none(),
                "content {:?} should be ignored",
                content
            );
        }
    }

    #[tokio::test]
    async fn unreadable_path_reads_as_no_previous_run() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be.
        let tracker = LastRunTracker::new(&config_with_file(temp.path().to_path_buf()));
        assert!(tracker.last_run_info().await.is_none());
    }

    #[tokio::test]
    async fn filter_installs_failed_matcher() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"status":"failed","failedTests":["a","c"],"testDurations":{}}"#,
        )
        .unwrap();

        let mut config = config_with_file(path);
        let tracker = LastRunTracker::new(&config);
        tracker.filter_last_failed(&mut config).await;

        let eligible: Vec<&str> = ["a", "b", "c", "d"]
            .into_iter()
            .filter(|id| config.is_test_eligible(id))
            .collect();
        assert_eq!(eligible, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn clean_previous_run_selects_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, r#"{"status":"passed","failedTests":[]}"#).unwrap();

        let mut config = config_with_file(path);
        let tracker = LastRunTracker::new(&config);
        tracker.filter_last_failed(&mut config).await;

        assert!(config.test_id_matcher.is_some());
        assert!(!config.is_test_eligible("a"));
    }

    #[tokio::test]
    async fn filter_without_previous_run_keeps_all_tests() {
        let temp = TempDir::new().unwrap();
        let mut config = config_with_file(temp.path().join("missing.json"));
        let tracker = LastRunTracker::new(&config);

        tracker.filter_last_failed(&mut config).await;

        assert!(config.test_id_matcher.is_none());
        assert!(config.is_test_eligible("anything"));
    }

    #[tokio::test]
    async fn prepare_selection_respects_last_failed_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, r#"{"status":"failed","failedTests":["a"]}"#).unwrap();

        let mut config = config_with_file(path);
        let tracker = LastRunTracker::new(&config);

        tracker.prepare_selection(&mut config).await;
        assert!(config.test_id_matcher.is_none());

        config.last_failed = true;
        tracker.prepare_selection(&mut config).await;
        assert!(!config.is_test_eligible("b"));
        assert!(config.is_test_eligible("a"));
    }

    #[tokio::test]
    async fn no_path_is_a_no_op() {
        let mut config = RunConfig::default();
        let mut tracker = LastRunTracker::new(&config);

        assert!(tracker.last_run_file().is_none());
        assert!(tracker.last_run_info().await.is_none());
        tracker.filter_last_failed(&mut config).await;
        assert!(config.test_id_matcher.is_none());

        record(
            &mut tracker,
            suite_of(vec![test_case("a", &[(TestStatus::Failed, 1)])]),
            RunStatus::Failed,
        )
        .await;
    }

    #[tokio::test]
    async fn list_only_run_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let previous = r#"{"status":"failed","failedTests":["old"]}"#;
        std::fs::write(&path, previous).unwrap();

        let config = RunConfig {
            list_only: true,
            ..config_with_file(path.clone())
        };
        let mut tracker = LastRunTracker::new(&config);
        record(
            &mut tracker,
            suite_of(vec![test_case("new", &[(TestStatus::Passed, 1)])]),
            RunStatus::Passed,
        )
        .await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), previous);
    }

    #[tokio::test]
    async fn second_record_replaces_first() {
        let temp = TempDir::new().unwrap();
        let config = config_with_file(temp.path().join("state.json"));

        let mut first = LastRunTracker::new(&config);
        record(
            &mut first,
            suite_of(vec![
                test_case("a", &[(TestStatus::Failed, 1)]),
                test_case("b", &[(TestStatus::Failed, 1)]),
            ]),
            RunStatus::Failed,
        )
        .await;

        let mut second = LastRunTracker::new(&config);
        record(
            &mut second,
            suite_of(vec![test_case("c", &[(TestStatus::Failed, 1)])]),
            RunStatus::Interrupted,
        )
        .await;

        let info = second.last_run_info().await.unwrap();
        assert_eq!(info.status, RunStatus::Interrupted);
        assert_eq!(info.failed_tests, vec!["c"]);
        assert!(!info.test_durations.contains_key("a"));
    }

    #[tokio::test]
    async fn end_without_begin_writes_empty_record() {
        let temp = TempDir::new().unwrap();
        let config = config_with_file(temp.path().join("state.json"));
        let mut tracker = LastRunTracker::new(&config);

        tracker
            .on_end(&RunResult::new(RunStatus::Interrupted))
            .await;

        let info = tracker.last_run_info().await.unwrap();
        assert_eq!(info, LastRunInfo::empty(RunStatus::Interrupted));
    }

    #[tokio::test]
    async fn attempts_added_after_begin_are_recorded() {
        let temp = TempDir::new().unwrap();
        let config = config_with_file(temp.path().join("state.json"));
        let mut tracker = LastRunTracker::new(&config);

        let suite = Suite::new("root")
            .with_test(TestCase::new("late", "late"))
            .into_shared();
        tracker.on_begin(Arc::clone(&suite)).await;

        suite
            .write()
            .unwrap()
            .test_mut("late")
            .unwrap()
            .record_attempt(TestStatus::Failed, 42);

        tracker.on_end(&RunResult::new(RunStatus::Failed)).await;

        let info = tracker.last_run_info().await.unwrap();
        assert_eq!(info.failed_tests, vec!["late"]);
        assert_eq!(info.test_durations["late"], 42);
    }

    #[tokio::test]
    async fn write_failure_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let config = config_with_file(blocker.join("state.json"));
        let mut tracker = LastRunTracker::new(&config);

        record(&mut tracker, suite_of(Vec::new()), RunStatus::Passed).await;

        assert!(tracker.last_run_info().await.is_none());
    }
}
