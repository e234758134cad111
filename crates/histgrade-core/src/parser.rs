//! JSON requirement parser.
//!
//! Loads the ordered requirement list the grader checks every student against.
//! Validation is all-or-nothing: one malformed row aborts the whole load, so a
//! typo in the requirements file can never silently drop a command.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::GradeConfig;
use crate::error::{GradeError, Result};
use crate::model::Requirement;

/// Intermediate row shape. Both fields optional so a missing key produces a
/// row-indexed validation error instead of a serde type error.
#[derive(Debug, Deserialize)]
struct RawRequirement {
    #[serde(default)]
    slide: Option<u64>,
    #[serde(default)]
    command: Option<String>,
}

/// Parse a requirements file into the ordered `Requirement` sequence.
pub fn parse_requirements(path: &Path) -> Result<Vec<Requirement>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GradeError::InvalidInput(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_requirements_str(&content, path)
}

/// Parse a JSON string into requirements (useful for testing).
pub fn parse_requirements_str(content: &str, source: &Path) -> Result<Vec<Requirement>> {
    let rows: Vec<RawRequirement> = serde_json::from_str(content).map_err(|e| {
        GradeError::InvalidInput(format!("{} is not a JSON array of requirements: {e}", source.display()))
    })?;

    if rows.is_empty() {
        return Err(GradeError::InvalidInput(format!(
            "{} contains no requirements",
            source.display()
        )));
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let slide = match row.slide {
                Some(s) if s >= 1 && s <= u64::from(u32::MAX) => s as u32,
                Some(s) => {
                    return Err(GradeError::InvalidInput(format!(
                        "row {i}: slide {s} out of range"
                    )))
                }
                None => {
                    return Err(GradeError::InvalidInput(format!(
                        "row {i}: missing slide number"
                    )))
                }
            };
            let command = match row.command {
                Some(c) if !c.trim().is_empty() => c,
                _ => {
                    return Err(GradeError::InvalidInput(format!(
                        "row {i}: missing or empty command"
                    )))
                }
            };
            Ok(Requirement { slide, command })
        })
        .collect()
}

/// Resolve the CLI's positional argument to a requirements file path.
///
/// An existing path wins; otherwise a bare name (no path separator) is looked
/// up in the configured shared directory with a `.json` suffix appended.
pub fn resolve_requirements_path(arg: &str, config: &GradeConfig) -> Result<PathBuf> {
    let literal = PathBuf::from(arg);
    if literal.is_file() {
        return Ok(literal);
    }

    let mut tried = vec![literal];
    if !arg.contains(std::path::MAIN_SEPARATOR) {
        let shared = config.requirements_dir.join(format!("{arg}.json"));
        if shared.is_file() {
            return Ok(shared);
        }
        tried.push(shared);
    }

    Err(GradeError::RequirementsNotFound { tried })
}
