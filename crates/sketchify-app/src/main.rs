//! Main application entry point.

use clap::{Args, Parser, Subcommand};
use sketchify_app::{run_session, App, AppConfig, AppError, Session, ShortcutRegistry};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sketchify", version, about = "Freehand and shape drawing surface")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded session and export the results.
    Replay(ReplayArgs),
    /// Print the keyboard shortcuts.
    Shortcuts,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Session file (JSON list of steps).
    session: PathBuf,

    /// Configuration file (JSON).
    #[arg(long, env = "SKETCHIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Directory exported images are written to.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Confirm clearing the canvas without asking.
    #[arg(long)]
    yes: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Shortcuts => {
            ShortcutRegistry::print_all();
            ExitCode::SUCCESS
        }
        Command::Replay(args) => match replay(args) {
            Ok(code) => code,
            Err(e) => {
                log::error!("{e}");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn replay(args: ReplayArgs) -> Result<ExitCode, AppError> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(out) = args.out {
        config.export_dir = out;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let session = Session::load(&args.session)?;
    log::info!("Starting Sketchify");

    let assume_yes = args.yes;
    let mut app = App::new(config)?.with_confirmation(move |prompt| assume_yes || ask(prompt));
    let report = run_session(&mut app, &session);

    println!("{}", app.status_line());
    for path in &report.exported {
        println!("exported {}", path.display());
    }
    if report.failed_exports > 0 {
        eprintln!("{} export(s) failed", report.failed_exports);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Ask a yes/no question on the terminal; anything but "y" or "yes" declines.
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
