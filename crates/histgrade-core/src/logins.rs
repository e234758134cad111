//! Last-login lookups for the companion login-check utility.
//!
//! One `lastlog -u <name>` invocation per student. The tool's absence is the
//! only fatal case; everything else degrades to an UNKNOWN row.

use std::process::Command;

use crate::config::GradeConfig;
use crate::error::{GradeError, Result};
use crate::model::{LoginReport, LoginStatus, Student};

const NEVER_MARKER: &str = "**Never logged in**";

/// Query the last-login record for one student.
pub fn check_login(student: &Student, config: &GradeConfig) -> Result<LoginReport> {
    let output = match Command::new(&config.lastlog_command)
        .arg("-u")
        .arg(&student.name)
        .output()
    {
        Ok(out) => out,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GradeError::MissingTool(config.lastlog_command.clone()));
        }
        Err(e) => {
            tracing::warn!("lastlog failed for {}: {e}", student.name);
            return Ok(LoginReport {
                student: student.name.clone(),
                status: LoginStatus::Unknown,
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(LoginReport {
        student: student.name.clone(),
        status: classify(&student.name, &stdout),
    })
}

/// Check every student on the roster, in roster order.
pub fn check_all(roster: &[Student], config: &GradeConfig) -> Result<Vec<LoginReport>> {
    roster.iter().map(|s| check_login(s, config)).collect()
}

/// Classify raw lastlog output for one account.
///
/// lastlog prints a header line, then at most one record line starting with
/// the account name. A record containing the never-marker is an explicit NO;
/// any other record is evidence of a login; no record line at all is UNKNOWN.
fn classify(name: &str, output: &str) -> LoginStatus {
    let record = output
        .lines()
        .find(|line| line.split_whitespace().next() == Some(name));

    match record {
        Some(line) if line.contains(NEVER_MARKER) => LoginStatus::NeverLoggedIn,
        Some(line) => LoginStatus::LoggedIn {
            record: line.trim().to_string(),
        },
        None => LoginStatus::Unknown,
    }
}
