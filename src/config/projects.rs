//! Project selection by name.
//!
//! Selectors match project names case-insensitively. A selector containing
//! `*` is a whole-name wildcard.

use regex::Regex;
use std::collections::HashSet;

use crate::config::schema::ProjectConfig;
use crate::error::{LastRunError, Result};

/// Select the projects named by `filter`, in configured order.
///
/// With no filter every project is selected.
///
/// # Errors
///
/// Returns `ProjectNotFound` when a literal (non-wildcard) name matches no
/// configured project. Wildcards that match nothing are not an error.
pub fn filter_projects<'a>(
    projects: &'a [ProjectConfig],
    filter: Option<&[String]>,
) -> Result<Vec<&'a ProjectConfig>> {
    let Some(names) = filter else {
        return Ok(projects.iter().collect());
    };

    let mut unmatched: HashSet<String> = HashSet::new();
    let mut patterns = Vec::new();

    for name in names {
        let lower = name.to_lowercase();
        if lower.contains('*') {
            patterns.push(wildcard_regex(&lower)?);
        } else {
            unmatched.insert(lower);
        }
    }

    let literal: Vec<String> = unmatched.iter().cloned().collect();
    let selected: Vec<&ProjectConfig> = projects
        .iter()
        .filter(|project| {
            let lower = project.name.to_lowercase();
            if literal.contains(&lower) {
                unmatched.remove(&lower);
                return true;
            }
            patterns.iter().any(|re| re.is_match(&lower))
        })
        .collect();

    // Report the first missing name in selector order so the message is stable.
    if let Some(missing) = names
        .iter()
        .find(|n| unmatched.contains(&n.to_lowercase()))
    {
        let available = projects
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join("\", \"");
        return Err(LastRunError::ProjectNotFound {
            name: missing.clone(),
            available,
        });
    }

    Ok(selected)
}

fn wildcard_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern).replace(r"\*", ".*");
    Regex::new(&format!("^{}$", escaped)).map_err(|e| {
        LastRunError::Other(anyhow::anyhow!(
            "invalid project pattern '{}': {}",
            pattern,
            e
        ))
    })
}
