//! Application run modes: logger init, offline subcommands, single question, TUI launch.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::config::Config;
use crate::core::segment::Segment;
use crate::core::solver::{self, SolveOptions, SolveRequest, Solver};

/// Indent for display math in plain-text output.
const MATH_INDENT: &str = "    ";

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()));

    if args.is_interactive()
        && let Some(path) = core::paths::log_file()
    {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Read an argument, or stdin when the argument is absent or "-".
fn text_or_stdin(arg: Option<&str>) -> io::Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Render segments as terminal text: plain text as-is, display math typeset and indented.
pub fn render_plain(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|seg| seg.is_math() || !seg.body.is_empty())
        .map(|seg| {
            if !seg.is_math() {
                return seg.body.clone();
            }
            let set = core::typeset::typeset(&seg.body);
            if set.is_empty() {
                // Blank math still occupies its slot.
                return MATH_INDENT.to_string();
            }
            set.lines()
                .map(|line| format!("{}{}", MATH_INDENT, line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `segment` subcommand: print one JSON object per segment, or the reconstructed reply.
pub fn run_segment(
    file: Option<&Path>,
    reconstruct: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => text_or_stdin(None)?,
    };
    let segments = core::segment::segment(&text);
    let mut stdout = io::stdout().lock();
    if reconstruct {
        writeln!(stdout, "{}", core::segment::reconstruct(&segments))?;
        return Ok(());
    }
    for seg in &segments {
        writeln!(stdout, "{}", serde_json::to_string(seg)?)?;
    }
    Ok(())
}

/// `normalize` subcommand: print the rewritten question.
pub fn run_normalize(text: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let text = text_or_stdin(text)?;
    println!("{}", core::normalize::normalize_prompt(&text));
    Ok(())
}

/// `config` subcommand: print variables and log file location.
pub fn run_config() {
    for (name, value) in core::config::status() {
        println!("{:<28} {}", name, value);
    }
    let log_path = core::paths::log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unavailable)".to_string());
    println!("{:<28} {}", "log file (TUI mode)", log_path);
}

/// Single question mode: solve a text question or image, print the reply to stdout.
/// A failed call prints the warning reply; it is not an exit error.
pub async fn run_single_prompt(
    args: &Args,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model.as_deref().unwrap_or(&config.model_id);
    let solver = Solver::new(config, model);

    let question;
    let image;
    let request = if let Some(path) = args.image.as_deref() {
        image = core::image::load(path)?;
        SolveRequest::Image(&image)
    } else {
        question = text_or_stdin(args.prompt.as_deref())?;
        let trimmed = question.trim();
        if trimmed.is_empty() {
            eprintln!("Error: empty prompt");
            std::process::exit(1);
        }
        SolveRequest::Text(trimmed)
    };

    let options = if args.raw {
        SolveOptions {
            on_content_chunk: Some(Box::new(|s: &str| {
                let _ = io::stdout().write_all(s.as_bytes());
                let _ = io::stdout().flush();
            })),
            ..Default::default()
        }
    } else {
        SolveOptions::default()
    };

    let result = solver.solve(request, options).await;
    let streamed = args.raw && result.is_ok();
    let reply = solver::reply_text(result, request.mode_label());

    if streamed {
        println!();
    } else if args.raw {
        println!("{}", reply.text);
    } else {
        let segments = core::segment::segment(&reply.text);
        println!("{}", render_plain(&segments));
    }
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let config_clone = config.clone();
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config_clone)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
