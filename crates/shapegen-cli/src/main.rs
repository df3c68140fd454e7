//! shapegen CLI - Code generator front end
//!
//! Commands:
//! - `shapegen generate` - Generate model and client code into a directory
//! - `shapegen check` - Validate a model and settings file
//! - `shapegen order` - Print the declaration order for a service

use clap::{Parser, Subcommand};
use shapegen_core::{Backend, CodegenError, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod generate;
mod load;
mod manifest;
mod order;

#[derive(Parser)]
#[command(name = "shapegen")]
#[command(author, version, about = "Schema-driven code generator", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); overrides the settings file
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for the configured backends
    Generate {
        /// Path to the JSON model document
        #[arg(short, long)]
        model: PathBuf,

        /// Path to the settings file (.json or .toml)
        #[arg(short, long)]
        settings: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: PathBuf,

        /// Backend to run (cpp, python, typescript, java); repeatable, overrides settings
        #[arg(short, long = "backend")]
        backends: Vec<Backend>,
    },

    /// Validate a model and settings file
    Check {
        /// Path to the JSON model document
        #[arg(short, long)]
        model: PathBuf,

        /// Path to the settings file (.json or .toml)
        #[arg(short, long)]
        settings: PathBuf,
    },

    /// Print the declaration order for the configured service
    Order {
        /// Path to the JSON model document
        #[arg(short, long)]
        model: PathBuf,

        /// Path to the settings file (.json or .toml)
        #[arg(short, long)]
        settings: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shapegen_logging::init_logging(cli.log_level.unwrap_or(LogLevel::Info));
    let level_fixed = cli.log_level.is_some();

    let result = match cli.command {
        Commands::Generate {
            model,
            settings,
            output,
            backends,
        } => generate::run(&model, &settings, &output, &backends, level_fixed),
        Commands::Check { model, settings } => check::run(&model, &settings, level_fixed),
        Commands::Order { model, settings } => order::run(&model, &settings, level_fixed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Generation failures exit with their error code; anything else exits 1
fn exit_status(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CodegenError>())
        .and_then(|e| u8::try_from(e.error_code()).ok())
        .unwrap_or(1)
}
