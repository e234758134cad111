//! Error types and exit codes for histgrade.
//!
//! Exit codes:
//! - 0: success
//! - 1: roster filter matched no students
//! - 2: usage error, missing/malformed input, or required external tool unavailable

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes for the histgrade binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// No students matched the roster filter (1)
    EmptyRoster = 1,
    /// Usage error, bad input, or missing external tool (2)
    Usage = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors surfaced to the caller as run-level failures.
///
/// Per-student problems (no home directory, no history files, unreadable
/// individual files) are not errors — they degrade to report-row content.
#[derive(Error, Debug)]
pub enum GradeError {
    /// The requirement data failed validation. No row is silently dropped;
    /// the first malformed row aborts the whole load.
    #[error("invalid requirement data: {0}")]
    InvalidInput(String),

    /// Neither the literal path nor the shared-directory candidate exists.
    #[error("requirements file not found (tried {tried:?})")]
    RequirementsNotFound { tried: Vec<PathBuf> },

    /// The roster filter produced zero students.
    #[error("no student accounts found in uid range {uid_min}-{uid_max}")]
    NoStudentsFound { uid_min: u32, uid_max: u32 },

    /// A required external tool could not be spawned.
    #[error("required tool not available: {0}")]
    MissingTool(String),

    /// The config file was present but unusable.
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GradeError {
    /// Map an error to the exit code the CLI contract promises.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradeError::NoStudentsFound { .. } => ExitCode::EmptyRoster,

            GradeError::InvalidInput(_)
            | GradeError::RequirementsNotFound { .. }
            | GradeError::MissingTool(_)
            | GradeError::Config(_)
            | GradeError::Io(_) => ExitCode::Usage,
        }
    }
}

/// Result type alias for histgrade operations.
pub type Result<T> = std::result::Result<T, GradeError>;
