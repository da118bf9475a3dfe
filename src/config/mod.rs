//! Configuration for a tracked run.
//!
//! - Schema definitions and the resolved [`RunConfig`] in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Project selection in [`projects`]
//!
//! # Example
//!
//! ```
//! use lastrun::config::{filter_projects, parse_config, RunConfig};
//! use std::path::Path;
//!
//! let file = parse_config(
//!     "projects:\n  - name: unit\n    output_dir: out/unit\n",
//!     Path::new("lastrun.yml"),
//! )
//! .unwrap();
//! let config = RunConfig::from_file(file, Path::new("/repo"));
//!
//! let selected = filter_projects(&config.projects, None).unwrap();
//! assert_eq!(selected[0].output_dir, Path::new("/repo/out/unit"));
//! ```

pub mod loader;
pub mod projects;
pub mod schema;

pub use loader::{
    default_config_path, load_config_file, load_run_config, parse_config, DEFAULT_CONFIG_FILE,
};
pub use projects::filter_projects;
pub use schema::{ConfigFile, ProjectConfig, RunConfig, DEFAULT_OUTPUT_DIR};
