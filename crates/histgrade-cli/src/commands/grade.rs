//! The grading run: load requirements and roster, grade each student, render.

use std::path::Path;

use comfy_table::{Cell, Table};

use histgrade_core::config::load_config_from;
use histgrade_core::engine::Grader;
use histgrade_core::error::Result;
use histgrade_core::model::StudentReport;
use histgrade_core::parser;
use histgrade_core::roster;

/// Printed after the table. Bash flushes history on logout, so commands from a
/// live session may not be on disk yet.
const CLOSING_REMINDER: &str =
    "Reminder: bash writes history at logout — have students log out (or run `history -a`) before grading.";

pub fn execute(
    requirements_arg: &str,
    config_path: Option<&Path>,
    check_only: bool,
    json: bool,
) -> Result<()> {
    let config = load_config_from(config_path)?;

    let path = parser::resolve_requirements_path(requirements_arg, &config)?;
    let requirements = parser::parse_requirements(&path)?;
    tracing::debug!("loaded {} requirement(s) from {}", requirements.len(), path.display());

    let grader = Grader::new(requirements, config.clone())?;

    if check_only {
        let budget = grader.budget();
        println!(
            "{}: {} requirements, base {} remainder {} of {} points",
            path.display(),
            grader.requirements().len(),
            budget.base,
            budget.remainder,
            budget.total,
        );
        return Ok(());
    }

    let students = roster::load_roster(&config)?;
    let reports = grader.grade_all(&students);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports).expect("reports serialize"));
    } else {
        print_report(&reports);
        println!("\n{CLOSING_REMINDER}");
    }

    Ok(())
}

fn print_report(reports: &[StudentReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        "STUDENT",
        "FOUND",
        "POINTS",
        "SLIDE-FOR-MISSING-COMMAND",
    ]);

    for report in reports {
        table.add_row(vec![
            Cell::new(&report.student),
            Cell::new(report.found_display()),
            Cell::new(report.points),
            Cell::new(report.detail_display()),
        ]);
    }

    println!("{table}");
}
