//! CLI entry point for the pass mark calculator.
//!
//! Provides subcommands for projecting a single set of scores, an interactive
//! form on stdin, batch projection over a CSV file, and printing the grading
//! scheme in effect.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use passmark::batch::project_file;
use passmark::form::run_session;
use passmark::input::ScoreInput;
use passmark::output::{BatchReport, print_pretty, write_json, write_records, write_report};
use passmark::scheme::GradingScheme;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "passmark")]
#[command(about = "Work out the final exam score needed to pass a course", long_about = None)]
struct Cli {
    /// JSON grading scheme to use instead of the built-in one
    #[arg(long, global = true, env = "PASSMARK_SCHEME")]
    scheme: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the final exam score for one set of marks
    Project {
        /// Course name shown in the result
        #[arg(long, default_value = "")]
        course: String,

        /// Class participation mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        participation: String,

        /// Assignment / presentation mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        assignment: String,

        /// Class test mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        class_test: String,

        /// Mid term mark
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        mid_term: String,

        /// Print the result as JSON instead of a message
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fill in the form field by field on stdin
    Interactive,
    /// Project every row of a CSV file
    Batch {
        /// CSV with course_name, class_participation, assignment_presentation, class_test, mid_term
        #[arg(value_name = "INPUT_CSV")]
        input: String,

        /// File to write results to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write a JSON report instead of CSV
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the grading scheme in effect as JSON
    Scheme,
}

const DEFAULT_LOG_FILE: &str = "logs/passmark.log";

/// Installs a colored stderr layer (`RUST_LOG`, default `info`) and a JSON layer
/// on a daily rolling file (`RUST_LOG_JSON`, default `debug`).
///
/// The returned guard flushes the file writer when dropped.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_path = Path::new(&log_file_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_path.file_name().unwrap_or(OsStr::new("passmark.log"));

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, log_file_name));

    let console = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let file = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(guard)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let _log_guard = init_logging()?;

    let cli = Cli::parse();
    let scheme = GradingScheme::load_or_default(cli.scheme.as_deref())?;
    if let Some(path) = &cli.scheme {
        info!(path = %path, "Using grading scheme from file");
    }

    match cli.command {
        Commands::Project {
            course,
            participation,
            assignment,
            class_test,
            mid_term,
            json,
        } => {
            let input =
                ScoreInput::from_text(&course, &participation, &assignment, &class_test, &mid_term);
            let result = scheme.project(&input);
            print_pretty(&result);

            if json {
                write_json(io::stdout().lock(), &result)?;
            } else {
                println!("[{}]\n{}", result.kind(), result.message(&scheme));
            }
        }
        Commands::Interactive => {
            run_session(&scheme, io::stdin().lock(), io::stdout())?;
        }
        Commands::Batch {
            input,
            output,
            json,
        } => {
            let records = project_file(&input, &scheme)?;

            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("failed to create {path}"))?,
                ),
                None => Box::new(io::stdout().lock()),
            };

            if json {
                write_report(writer, &BatchReport::new(records))?;
            } else {
                write_records(writer, &records)?;
            }

            if let Some(path) = output {
                info!(path = %path, "Batch results written");
            }
        }
        Commands::Scheme => {
            println!("{}", serde_json::to_string_pretty(&scheme)?);
        }
    }

    Ok(())
}
