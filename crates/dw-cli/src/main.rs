//! CLI frontend for Darkwell level documents.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dw",
    about = "Darkwell — level tooling for the adventure engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a level document, reporting a summary
    Check {
        /// Path to a .json or .yaml level document
        file: PathBuf,
    },

    /// Print the debug snapshot of a freshly loaded level
    Show {
        /// Path to a .json or .yaml level document
        file: PathBuf,

        /// Emit the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::Show { file, json } => commands::show::run(&file, json),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
