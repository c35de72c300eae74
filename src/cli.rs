//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  snap2solve                           Launch interactive TUI
  snap2solve -p \"solve 2x + 3 = 7\"     Single question, print the formatted solution
  snap2solve -p -                      Read the question from stdin
  snap2solve --image equation.png      Solve the equation in a photo
  snap2solve segment reply.txt         Split a reply into text/math segments (JSON lines)
  snap2solve segment --reconstruct     Rebuild reply text from its segments (stdin)
  snap2solve normalize '\\(x^2\\) = 4'   Show how a question is rewritten before sending
  snap2solve config                    Show configuration status
  snap2solve completions bash          Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Math chat solver: ask a question or send a photo, get a step-by-step solution",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single question then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Ask a single question and print the solution (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Solve the equation in an image file (png, jpg, jpeg)
    #[arg(short = 'i', long, conflicts_with = "prompt", value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Override model for single question mode
    #[arg(short = 'm', long, help = "Model ID (e.g. gpt-4o)")]
    pub model: Option<String>,

    /// Print the reply as it streams in, without segmenting it
    #[arg(long)]
    pub raw: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split reply text into plain-text and display-math segments (one JSON object per line)
    Segment {
        /// File containing the reply (reads stdin when omitted or '-')
        file: Option<PathBuf>,
        /// Print the segments joined back into reply text instead of JSON
        #[arg(long)]
        reconstruct: bool,
    },
    /// Rewrite a question the way it is sent to the solver
    Normalize {
        /// Question text (reads stdin when omitted or '-')
        text: Option<String>,
    },
    /// Show config variables and their status
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when the interactive TUI will run (no subcommand, no single question).
    pub fn is_interactive(&self) -> bool {
        self.command.is_none() && self.prompt.is_none() && self.image.is_none()
    }
}
