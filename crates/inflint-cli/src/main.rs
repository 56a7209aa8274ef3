//! inflint CLI: checks the `ESH-INF` descriptors of a project.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use inflint_core::config::CONFIG_FILE_NAME;
use inflint_core::{CheckReport, Diagnostic, DiagnosticLevel, InfXmlCheck, LintConfig};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: u8 = 0;
const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "inflint",
    version,
    about = "Check ESH-INF thing, binding and config descriptors"
)]
struct Cli {
    /// Project directory or single file to check
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to .inflint.toml in the project directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Treat warnings (such as skipped oversized files) as failures
    #[arg(long)]
    strict: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "inflint_core=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_config(cli: &Cli) -> (LintConfig, Option<String>) {
    let path = cli.config.clone().or_else(|| {
        let dir = if cli.path.is_dir() {
            cli.path.as_path()
        } else {
            cli.path.parent().unwrap_or(Path::new("."))
        };
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    });
    LintConfig::load_or_default(path.as_ref())
}

fn run(cli: &Cli) -> Result<CheckReport> {
    let (config, warning) = resolve_config(cli);
    if let Some(warning) = warning {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let check = InfXmlCheck::with_builtin_validators();
    let report = if cli.path.is_file() {
        inflint_core::check_file(&cli.path, &check, &config)
    } else {
        inflint_core::check_project(&cli.path, &check, &config)
    };
    report.with_context(|| format!("checking {}", cli.path.display()))
}

fn format_level(level: DiagnosticLevel) -> colored::ColoredString {
    match level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
    }
}

fn print_text(report: &CheckReport) {
    for diag in &report.diagnostics {
        println!(
            "{}:{}:{} {}[{}]: {}",
            diag.file.display(),
            diag.line,
            diag.column,
            format_level(diag.level),
            diag.rule,
            diag.message
        );
        if let Some(suggestion) = &diag.suggestion {
            println!("  {} {}", "help:".cyan(), suggestion);
        }
    }

    let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
    let summary = format!(
        "{} file(s) checked, {} descriptor(s) validated, {} error(s), {} warning(s)",
        report.files_checked,
        report.files_dispatched,
        errors,
        report.diagnostics.len() - errors
    );
    if report.diagnostics.is_empty() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary);
    }
}

fn print_json(report: &CheckReport) -> Result<()> {
    let output = serde_json::json!({
        "files_checked": report.files_checked,
        "files_dispatched": report.files_dispatched,
        "diagnostics": &report.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn should_fail(diagnostics: &[Diagnostic], strict: bool) -> bool {
    diagnostics
        .iter()
        .any(|d| d.is_error() || (strict && d.level == DiagnosticLevel::Warning))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match cli.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => {
            if let Err(e) = print_json(&report) {
                eprintln!("{} {:#}", "error:".red().bold(), e);
                return ExitCode::from(EXIT_FATAL);
            }
        }
    }

    if should_fail(&report.diagnostics, cli.strict) {
        ExitCode::from(EXIT_DIAGNOSTICS)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
