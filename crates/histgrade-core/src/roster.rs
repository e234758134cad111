//! Roster enumeration from the system account database.
//!
//! Students are the passwd entries whose uid falls in the configured range,
//! minus the excluded infrastructure accounts. The passwd path is configurable
//! so tests (and non-standard hosts) can point at their own file.

use std::path::PathBuf;

use crate::config::GradeConfig;
use crate::error::{GradeError, Result};
use crate::model::Student;

/// One parsed passwd line. Fields: name:passwd:uid:gid:gecos:home:shell
struct PasswdEntry {
    name: String,
    uid: u32,
    home: Option<PathBuf>,
}

fn parse_passwd_line(line: &str) -> Option<PasswdEntry> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < 6 {
        return None;
    }
    let uid = fields[2].parse().ok()?;
    let home = fields[5];
    Some(PasswdEntry {
        name: fields[0].to_string(),
        uid,
        home: (!home.is_empty()).then(|| PathBuf::from(home)),
    })
}

/// Enumerate student accounts in account-database order.
///
/// Malformed lines are skipped with a warning; an empty result is the
/// run-level `NoStudentsFound` failure.
pub fn load_roster(config: &GradeConfig) -> Result<Vec<Student>> {
    let content = std::fs::read_to_string(&config.passwd_path).map_err(|e| {
        GradeError::Config(format!(
            "cannot read account database {}: {e}",
            config.passwd_path.display()
        ))
    })?;

    let mut students = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(entry) = parse_passwd_line(line) else {
            tracing::warn!(
                "skipping malformed line {} in {}",
                lineno + 1,
                config.passwd_path.display()
            );
            continue;
        };
        if entry.uid < config.uid_min || entry.uid > config.uid_max {
            continue;
        }
        if config.excluded_users.iter().any(|u| u == &entry.name) {
            continue;
        }
        students.push(Student {
            name: entry.name,
            home: entry.home,
        });
    }

    if students.is_empty() {
        return Err(GradeError::NoStudentsFound {
            uid_min: config.uid_min,
            uid_max: config.uid_max,
        });
    }

    tracing::debug!("roster: {} student(s)", students.len());
    Ok(students)
}
