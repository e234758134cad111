//! The per-student grading loop.
//!
//! Sequential by design: each student's history is read, matched against every
//! requirement, and scored before the next student starts. The only
//! accumulating state is the returned row list, in roster order.

use crate::config::GradeConfig;
use crate::error::{GradeError, Result};
use crate::history;
use crate::matcher;
use crate::model::{GradeOutcome, Requirement, Student, StudentReport};
use crate::score::PointBudget;

/// Compiled grading pass: the requirement set, its point split, and the
/// deployment config.
#[derive(Debug)]
pub struct Grader {
    requirements: Vec<Requirement>,
    budget: PointBudget,
    config: GradeConfig,
}

impl Grader {
    pub fn new(requirements: Vec<Requirement>, config: GradeConfig) -> Result<Self> {
        let budget = PointBudget::new(config.total_points, requirements.len())
            .ok_or_else(|| GradeError::InvalidInput("empty requirement set".into()))?;
        Ok(Self {
            requirements,
            budget,
            config,
        })
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn budget(&self) -> PointBudget {
        self.budget
    }

    /// Grade every student, one row per student in roster order.
    pub fn grade_all(&self, roster: &[Student]) -> Vec<StudentReport> {
        roster.iter().map(|s| self.grade_student(s)).collect()
    }

    /// Grade one student. Never fails: missing home directories, missing
    /// history, and pattern problems all degrade to row content.
    pub fn grade_student(&self, student: &Student) -> StudentReport {
        let total = self.requirements.len();

        let Some(home) = &student.home else {
            tracing::debug!("{}: no home directory", student.name);
            return StudentReport {
                student: student.name.clone(),
                matched: 0,
                total,
                points: 0,
                outcome: GradeOutcome::NoHomeDirectory,
            };
        };

        let corpus = history::read_history(home, &self.config);
        if corpus.is_empty() {
            tracing::debug!("{}: no history files", student.name);
            return StudentReport {
                student: student.name.clone(),
                matched: 0,
                total,
                points: 0,
                outcome: GradeOutcome::NoHistory,
            };
        }

        let flags: Vec<bool> = self
            .requirements
            .iter()
            .map(|req| match matcher::command_pattern(&req.command) {
                Ok(pattern) => matcher::corpus_contains(&pattern, &corpus.text),
                Err(e) => {
                    // A pattern that will not compile counts as not found
                    // rather than failing the student's evaluation.
                    tracing::warn!("pattern for {:?} failed to compile: {e}", req.command);
                    false
                }
            })
            .collect();

        let matched = flags.iter().filter(|f| **f).count();
        let missing_slides: Vec<u32> = self
            .requirements
            .iter()
            .zip(&flags)
            .filter(|(_, hit)| !**hit)
            .map(|(req, _)| req.slide)
            .collect();

        StudentReport {
            student: student.name.clone(),
            matched,
            total,
            points: self.budget.score(&flags),
            outcome: GradeOutcome::Graded { missing_slides },
        }
    }
}
