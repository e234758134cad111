//! Core data model types for histgrade.
//!
//! These are the types the grading pipeline passes between its stages:
//! requirements in, per-student reports out.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One shell command a student must demonstrate having run, tagged with the
/// lecture slide that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Slide number, shown in the missing-command column.
    pub slide: u32,
    /// The literal command as taught. Matching is whitespace-tolerant but
    /// otherwise exact.
    pub command: String,
}

/// A student account from the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Account name.
    pub name: String,
    /// Home directory, if the account database has one.
    pub home: Option<PathBuf>,
}

/// The concatenated, timestamp-stripped text of one student's history files.
#[derive(Debug, Clone, Default)]
pub struct HistoryCorpus {
    /// Cleaned history text, one command per line.
    pub text: String,
    /// How many history files contributed. Zero means "no history files".
    pub files_read: usize,
}

impl HistoryCorpus {
    pub fn is_empty(&self) -> bool {
        self.files_read == 0
    }
}

/// Why a student's row shows no missing-slide list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradeOutcome {
    /// History was scanned; `missing_slides` lists unmet requirements in
    /// original requirement order.
    Graded { missing_slides: Vec<u32> },
    /// The account database has no home directory for this student.
    NoHomeDirectory,
    /// The home directory exists but holds no history files.
    NoHistory,
}

/// One row of the score report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReport {
    /// Account name.
    pub student: String,
    /// Requirements found in the student's history.
    pub matched: usize,
    /// Total requirements checked.
    pub total: usize,
    /// Points awarded out of the configured budget.
    pub points: u32,
    /// Missing-slide list or the reason the student could not be graded.
    pub outcome: GradeOutcome,
}

impl StudentReport {
    /// The FOUND column: `matched/total`.
    pub fn found_display(&self) -> String {
        format!("{}/{}", self.matched, self.total)
    }

    /// The SLIDE-FOR-MISSING-COMMAND column: `slide <n>` tokens in requirement
    /// order, `(none)` when nothing is missing, or the degradation reason.
    pub fn detail_display(&self) -> String {
        match &self.outcome {
            GradeOutcome::Graded { missing_slides } if missing_slides.is_empty() => {
                "(none)".to_string()
            }
            GradeOutcome::Graded { missing_slides } => missing_slides
                .iter()
                .map(|slide| format!("slide {slide}"))
                .collect::<Vec<_>>()
                .join(", "),
            GradeOutcome::NoHomeDirectory => "no home directory".to_string(),
            GradeOutcome::NoHistory => "no history files".to_string(),
        }
    }
}

/// Classification of one student's last-login record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginStatus {
    /// A login record exists; the raw record line is kept as evidence.
    LoggedIn { record: String },
    /// The record source explicitly says the account never logged in.
    NeverLoggedIn,
    /// The record source produced no usable output.
    Unknown,
}

/// One row of the login report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReport {
    pub student: String,
    #[serde(flatten)]
    pub status: LoginStatus,
}

impl LoginStatus {
    /// The LOGGED-IN column.
    pub fn label(&self) -> &'static str {
        match self {
            LoginStatus::LoggedIn { .. } => "YES",
            LoginStatus::NeverLoggedIn => "NO",
            LoginStatus::Unknown => "UNKNOWN",
        }
    }

    /// The DETAIL column.
    pub fn detail(&self) -> &str {
        match self {
            LoginStatus::LoggedIn { record } => record,
            LoginStatus::NeverLoggedIn => "",
            LoginStatus::Unknown => "no usable lastlog output",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(matched: usize, outcome: GradeOutcome) -> StudentReport {
        StudentReport {
            student: "alice".into(),
            matched,
            total: 3,
            points: 0,
            outcome,
        }
    }

    #[test]
    fn found_display_ratio() {
        let r = report(2, GradeOutcome::Graded { missing_slides: vec![4] });
        assert_eq!(r.found_display(), "2/3");
    }

    #[test]
    fn detail_lists_missing_slides_in_order() {
        let r = report(
            1,
            GradeOutcome::Graded {
                missing_slides: vec![2, 7],
            },
        );
        assert_eq!(r.detail_display(), "slide 2, slide 7");
    }

    #[test]
    fn detail_none_marker_when_all_matched() {
        let r = report(3, GradeOutcome::Graded { missing_slides: vec![] });
        assert_eq!(r.detail_display(), "(none)");
    }

    #[test]
    fn detail_degradation_reasons() {
        assert_eq!(
            report(0, GradeOutcome::NoHomeDirectory).detail_display(),
            "no home directory"
        );
        assert_eq!(
            report(0, GradeOutcome::NoHistory).detail_display(),
            "no history files"
        );
    }

    #[test]
    fn login_status_labels() {
        let yes = LoginStatus::LoggedIn {
            record: "alice pts/0 10.0.0.5 Mon Sep 1".into(),
        };
        assert_eq!(yes.label(), "YES");
        assert_eq!(yes.detail(), "alice pts/0 10.0.0.5 Mon Sep 1");
        assert_eq!(LoginStatus::NeverLoggedIn.label(), "NO");
        assert_eq!(LoginStatus::Unknown.label(), "UNKNOWN");
    }

    #[test]
    fn requirement_serde_roundtrip() {
        let req = Requirement {
            slide: 12,
            command: "uname -r".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: Requirement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
