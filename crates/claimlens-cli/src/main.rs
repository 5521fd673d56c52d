//! Claimlens CLI - Classify cosmetic marketing claims from the command line.

use claimlens_cli::commands;
use claimlens_cli::repl;
use claimlens_cli::{Cli, Command, Config, Formatter, Session};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> claimlens_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_or_init(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let mut session = Session::from_config(&config)?;

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut session, &config, &formatter)?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &mut session, &formatter)?;
        }
        Some(Command::Results) => {
            commands::execute_results(&session, &formatter)?;
        }
        Some(Command::Show(args)) => {
            commands::execute_show(args, &session, &formatter)?;
        }
        Some(Command::Confirm(args)) => {
            commands::execute_confirm(args, &mut session, &formatter)?;
        }
        Some(Command::Correct(args)) => {
            commands::execute_correct(args, &mut session, &formatter)?;
        }
        Some(Command::Learn(args)) => {
            commands::execute_learn(args, &mut session, &formatter)?;
        }
        Some(Command::Remove(args)) => {
            commands::execute_remove(args, &mut session, &formatter)?;
        }
        Some(Command::Export(args)) => {
            commands::execute_export(args, &session, &formatter)?;
        }
        Some(Command::Import(args)) => {
            commands::execute_import(args, &mut session, &formatter)?;
        }
        Some(Command::Clear(args)) => {
            commands::execute_clear(args, &mut session, &formatter)?;
        }
        Some(Command::Report(args)) => {
            commands::execute_report(args, &session, &formatter)?;
        }
        Some(Command::Stats) => {
            commands::execute_stats(&session, &formatter)?;
        }
        Some(Command::Labels(args)) => {
            commands::execute_labels(args, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
