use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shipit_core::ShipitError;

mod commands;

/// shipit - submit work in progress for testing
#[derive(Parser)]
#[command(name = "shipit")]
#[command(about = "Check, commit, and push work in progress in one step")]
#[command(version)]
struct Cli {
    /// Path to the workspace root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the check, commit, and push sequence
    Submittest {
        /// Parameter overrides in NAME=value form (MSG, BRANCH)
        overrides: Vec<String>,
    },
    /// Show the command sequence without running it
    Plan {
        /// Parameter overrides in NAME=value form (MSG, BRANCH)
        overrides: Vec<String>,
    },
    /// Match a pattern against one line read from standard input
    Match {
        /// Pattern in extended syntax (like grep -E)
        #[arg(short = 'E', value_name = "PATTERN")]
        pattern: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submittest { overrides } => {
            commands::run::execute(&cli.workspace, &overrides)
        }
        Commands::Plan { overrides } => commands::plan::execute(&cli.workspace, &overrides),
        Commands::Match { pattern } => {
            return match commands::matcher::execute(&pattern) {
                Ok(code) => code,
                Err(err) => exit_code_for(&err),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_code_for(&err),
    }
}

/// Turn a run error into the process exit status.
///
/// A failed external command already printed its own diagnostics and its
/// exit code is propagated verbatim; everything else gets an error line and
/// exits 1.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let (code, step_failure) = match err.downcast_ref::<ShipitError>() {
        Some(shipit_err) => (shipit_err.exit_code(), shipit_err.is_step_failure()),
        None => (1, false),
    };

    if !step_failure {
        eprintln!("Error: {:#}", err);
    }

    match u8::try_from(code) {
        Ok(code @ 1..) => ExitCode::from(code),
        // Killed by signal or an out-of-range status
        _ => ExitCode::FAILURE,
    }
}
