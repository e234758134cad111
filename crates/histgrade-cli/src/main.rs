//! histgrade CLI — grade student shell histories against a requirement list.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use histgrade_core::error::ExitCode as GradeExitCode;

mod commands;

#[derive(Parser)]
#[command(
    name = "histgrade",
    version,
    about = "Grade student shell histories against required commands"
)]
struct Cli {
    /// Requirements file path, or a bare name resolved against the shared
    /// requirements directory with a .json suffix
    requirements: String,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Validate the requirements file and exit without grading
    #[arg(long)]
    check: bool,

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

    match commands::grade::execute(&cli.requirements, cli.config.as_deref(), cli.check, cli.json)
    {
        Ok(()) => ExitCode::from(GradeExitCode::Success as u8),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
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
