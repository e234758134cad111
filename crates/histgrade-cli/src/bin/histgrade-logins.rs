//! histgrade-logins — report whether each student has ever logged in.
//!
//! Companion to the grader: same roster, same exit-code conventions, one
//! lastlog lookup per student.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use comfy_table::{Cell, Table};

use histgrade_core::config::load_config_from;
use histgrade_core::error::{ExitCode as GradeExitCode, Result};
use histgrade_core::logins;
use histgrade_core::model::LoginReport;
use histgrade_core::roster;

#[derive(Parser)]
#[command(
    name = "histgrade-logins",
    version,
    about = "Report whether each student account has ever logged in"
)]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print report rows as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(GradeExitCode::Success as u8),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config_from(cli.config.as_deref())?;
    let students = roster::load_roster(&config)?;
    let reports = logins::check_all(&students, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports).expect("reports serialize"));
    } else {
        print_report(&reports);
    }

    Ok(())
}

fn print_report(reports: &[LoginReport]) {
    let mut table = Table::new();
    table.set_header(vec!["STUDENT", "LOGGED-IN", "DETAIL"]);

    for report in reports {
        table.add_row(vec![
            Cell::new(&report.student),
            Cell::new(report.status.label()),
            Cell::new(report.status.detail()),
        ]);
    }

    println!("{table}");
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("histgrade={level}").parse().expect("valid directive"))
                .add_directive(
                    format!("histgrade_core={level}")
                        .parse()
                        .expect("valid directive"),
                ),
        )
        .init();
}
