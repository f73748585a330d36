//! Command-line interface for doc-conf
//!
//! Provides `resolve`, `check` and `defaults` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod defaults;
mod resolve;
mod utils;

/// Resolve and validate the documentation-build configuration
#[derive(Parser)]
#[command(name = "doc-conf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and print it for the documentation engine
    Resolve(Box<resolve::ResolveArgs>),

    /// Validate the configuration without printing it
    Check(Box<resolve::CheckArgs>),

    /// Print the default configuration
    Defaults(defaults::DefaultsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Resolve(args) => resolve::run(*args),
        Commands::Check(args) => resolve::check(*args),
        Commands::Defaults(args) => defaults::run(args),
    }
}
