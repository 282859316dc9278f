//! Clusters Model CLI
//!
//! Checks and normalizes resource documents of the cluster management API.
//!
//! ```text
//! clusters-model check --kind cluster cluster.json
//! clusters-model fmt --kind label --list --output yaml < labels.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clusters_model::cli::{self, OutputFormat, ResourceKind};
use clusters_model::{Error, Result};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Clusters Model - check and normalize resource documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a document and report the first problem found
    Check {
        #[command(flatten)]
        input: Input,
    },

    /// Read a document and write it back in normalized form
    Fmt {
        #[command(flatten)]
        input: Input,

        /// Output format (json, yaml)
        #[arg(
            long,
            short,
            value_enum,
            env = "MODEL_OUTPUT",
            default_value_t = OutputFormat::Json
        )]
        output: OutputFormat,
    },
}

#[derive(clap::Args, Debug)]
struct Input {
    /// Resource kind of the document
    #[arg(long, short, value_enum)]
    kind: ResourceKind,

    /// The document is a JSON array of values
    #[arg(long)]
    list: bool,

    /// Document to read; standard input if omitted
    path: Option<PathBuf>,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if let Err(e) = init_logging(&args) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(parse_error = e.is_parse_error(), "Command failed");
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Check { input } => {
            let document = cli::read_input(input.path.as_deref())?;
            let report = cli::check(input.kind, input.list, &document)?;
            info!(kind = report.kind, count = report.count, "Document is valid");
            println!("ok: {} ({})", report.kind, report.count);
        }
        Command::Fmt { input, output } => {
            let document = cli::read_input(input.path.as_deref())?;
            let text = cli::normalize(input.kind, input.list, &document, output)?;
            print!("{}", text);
            if output == OutputFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}

/// The single line written to stderr when a command fails
fn failure_message(e: &Error) -> String {
    format!("error: {}", e)
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            return Err(Error::Configuration(format!("Unknown log level: {}", other)));
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so they never mix with the document on stdout
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_output_flag_is_value_enum() {
        let args =
            Args::try_parse_from(["clusters-model", "fmt", "--kind", "label", "-o", "yaml"]).unwrap();
        assert_matches!(args.command, Command::Fmt { output: OutputFormat::Yaml, .. });

        let args = Args::try_parse_from(["clusters-model", "fmt", "--kind", "label"]).unwrap();
        assert_matches!(args.command, Command::Fmt { output: OutputFormat::Json, .. });

        let err = Args::try_parse_from(["clusters-model", "fmt", "--kind", "label", "-o", "xml"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_failure_message_is_single_line() {
        let message = failure_message(&Error::Configuration("Unknown log level: loud".to_string()));
        assert!(message.starts_with("error: "));
        assert!(message.contains("Unknown log level: loud"));
        assert_eq!(message.lines().count(), 1);
    }
}
