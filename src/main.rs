//! # Snap2Solve - math chat solver
//!
//! Forwards typed math questions or photographed equations to a hosted model and
//! displays the step-by-step reply with plain text and display math kept apart.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - Single question with `-p` / `--image`
//! - Offline `segment` and `normalize` subcommands

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Segment { file, reconstruct }) => {
            return run::run_segment(file.as_deref(), *reconstruct);
        }
        Some(Commands::Normalize { text }) => return run::run_normalize(text.as_deref()),
        Some(Commands::Config) => {
            run::run_config();
            return Ok(());
        }
        None => {}
    }

    // Load application configuration (print user-friendly message; exit uses Display not Debug)
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if !args.is_interactive() {
        return run::run_single_prompt(&args, &config).await;
    }

    log::info!(
        "{} {} starting (model {} at {})",
        core::app::NAME,
        core::app::VERSION,
        config.model_id,
        config.base_url
    );
    run::launch_tui(config).await
}
