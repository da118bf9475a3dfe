//! Configuration schema definitions.
//!
//! [`ConfigFile`] is the on-disk YAML shape. [`RunConfig`] is the resolved
//! configuration for one run, including the slot where a test id matcher can
//! be installed before test collection.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::filter::{AllTests, TestIdMatcher};

/// Output directory used when a project does not name one.
pub const DEFAULT_OUTPUT_DIR: &str = "test-results";

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Root of the `lastrun.yml` configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Explicit state file path, overriding project-derived locations.
    #[serde(default)]
    pub last_run_file: Option<PathBuf>,

    /// Configured projects, in declaration order.
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

/// A named group of tests sharing an output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    /// Directory for test artifacts; the state file lives here by default.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Resolved configuration for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Explicit state file path (from the command line or config file).
    pub last_run_file: Option<PathBuf>,

    /// Configured projects with absolute output directories.
    pub projects: Vec<ProjectConfig>,

    /// Project names selected on the command line; `None` selects all.
    pub cli_project_filter: Option<Vec<String>>,

    /// The run only lists tests and executes nothing.
    pub list_only: bool,

    /// Restrict the run to tests that failed last time.
    pub last_failed: bool,

    /// Predicate consulted during test selection.
    pub test_id_matcher: Option<Arc<dyn TestIdMatcher>>,
}

impl RunConfig {
    /// Build a run configuration from a parsed config file.
    ///
    /// Relative paths are resolved against `base_dir`, the directory that
    /// holds the config file.
    pub fn from_file(file: ConfigFile, base_dir: &Path) -> Self {
        Self {
            last_run_file: file.last_run_file.map(|p| base_dir.join(p)),
            projects: file
                .projects
                .into_iter()
                .map(|p| ProjectConfig {
                    output_dir: base_dir.join(p.output_dir),
                    name: p.name,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Whether the test with this id should be selected.
    ///
    /// With no matcher installed every test is eligible.
    pub fn is_test_eligible(&self, test_id: &str) -> bool {
        match &self.test_id_matcher {
            Some(matcher) => matcher.is_eligible(test_id),
            None => AllTests.is_eligible(test_id),
        }
    }
}
