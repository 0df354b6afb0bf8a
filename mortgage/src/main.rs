// mortgage/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug mortgage generate ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: GENERATE STAR SCHEMA ---
        Commands::Generate(args) => commands::generate::execute(args),

        // --- USE CASE: VALIDATE EXPORT ---
        Commands::Validate(args) => commands::validate::execute(args),

        // --- USE CASE: CLEAN ---
        Commands::Clean { output_dir } => commands::clean::execute(output_dir),
    }
}
