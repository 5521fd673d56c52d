//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{
    AnalyzeArgs, ClearArgs, ClearTarget, Command, CorrectArgs, ExportArgs, ImportArgs, IndexArgs,
    KeywordArgs, LabelsArgs, ReportArgs,
};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Claimlens REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Repl(format!("Invalid history size: {}", e)))?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("claimlens [{}]> ", session.engine().results().len());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, session, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let command = match parts[0] {
        "exit" | "quit" | "q" => return Ok(ReplCommand::Exit),
        "help" | "?" => return Ok(ReplCommand::Help),
        "analyze" | "a" => parse_analyze_command(line, &parts[1..])?,
        "results" | "ls" => Command::Results,
        "show" => Command::Show(parse_index("show", &parts[1..])?),
        "confirm" | "ok" => Command::Confirm(parse_index("confirm", &parts[1..])?),
        "correct" => parse_correct_command(&parts[1..])?,
        "learn" => Command::Learn(parse_keyword_args("learn", &parts[1..])?),
        "remove" => Command::Remove(parse_keyword_args("remove", &parts[1..])?),
        "export" => Command::Export(ExportArgs {
            output: parts.get(1).map(PathBuf::from),
        }),
        "import" => {
            let file = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: import <file>".to_string()))?;
            Command::Import(ImportArgs {
                file: PathBuf::from(file),
            })
        }
        "clear" => Command::Clear(ClearArgs {
            target: parse_clear_target(parts.get(1).copied())?,
        }),
        "report" => parse_report_command(&parts[1..]),
        "stats" => Command::Stats,
        "labels" => Command::Labels(LabelsArgs {
            dimension: parts.get(1).map(|s| s.to_string()),
        }),
        _ => {
            return Err(CliError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                parts[0]
            )))
        }
    };
    Ok(ReplCommand::Command(command))
}

/// Execute a REPL command.
fn execute_repl_command(cmd: Command, session: &mut Session, formatter: &Formatter) -> Result<()> {
    match cmd {
        Command::Analyze(args) => commands::execute_analyze(args, session, formatter),
        Command::Results => commands::execute_results(session, formatter),
        Command::Show(args) => commands::execute_show(args, session, formatter),
        Command::Confirm(args) => commands::execute_confirm(args, session, formatter),
        Command::Correct(args) => commands::execute_correct(args, session, formatter),
        Command::Learn(args) => commands::execute_learn(args, session, formatter),
        Command::Remove(args) => commands::execute_remove(args, session, formatter),
        Command::Export(args) => commands::execute_export(args, session, formatter),
        Command::Import(args) => commands::execute_import(args, session, formatter),
        Command::Clear(args) => commands::execute_clear(args, session, formatter),
        Command::Report(args) => commands::execute_report(args, session, formatter),
        Command::Stats => commands::execute_stats(session, formatter),
        Command::Labels(args) => commands::execute_labels(args, formatter),
        Command::Repl => Err(CliError::InvalidInput("Already in REPL mode".to_string())),
    }
}

// Simple command parsers for REPL (minimal argument parsing)

fn parse_analyze_command(line: &str, args: &[&str]) -> Result<Command> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: analyze <claim> | analyze --file <path>".to_string(),
        ));
    }

    if matches!(args[0], "-i" | "--file") {
        let path = args
            .get(1)
            .ok_or_else(|| CliError::InvalidInput("Usage: analyze --file <path>".to_string()))?;
        return Ok(Command::Analyze(AnalyzeArgs {
            text: None,
            file: Some(PathBuf::from(path)),
            stdin: false,
        }));
    }

    // Keep the claim text as typed, inner spaces included
    let text = line
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    Ok(Command::Analyze(AnalyzeArgs {
        text: Some(text.to_string()),
        file: None,
        stdin: false,
    }))
}

fn parse_index(command: &str, args: &[&str]) -> Result<IndexArgs> {
    let index = args
        .first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CliError::InvalidInput(format!("Usage: {} <number>", command)))?;
    Ok(IndexArgs { index })
}

fn parse_correct_command(args: &[&str]) -> Result<Command> {
    if args.len() < 3 {
        return Err(CliError::InvalidInput(
            "Usage: correct <number> <dimension> <label[,label...]> [keyword]".to_string(),
        ));
    }

    let IndexArgs { index } = parse_index("correct", args)?;
    let labels = args[2]
        .split([',', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Command::Correct(CorrectArgs {
        index,
        dimension: args[1].to_string(),
        labels,
        keyword: args.get(3).map(|s| s.to_string()),
    }))
}

fn parse_keyword_args(command: &str, args: &[&str]) -> Result<KeywordArgs> {
    if args.len() < 3 {
        return Err(CliError::InvalidInput(format!(
            "Usage: {} <dimension> <label> <keyword>",
            command
        )));
    }

    Ok(KeywordArgs {
        dimension: args[0].to_string(),
        label: args[1].to_string(),
        keyword: args[2..].join(" "),
    })
}

fn parse_clear_target(arg: Option<&str>) -> Result<ClearTarget> {
    match arg {
        None | Some("results") => Ok(ClearTarget::Results),
        Some("learning") => Ok(ClearTarget::Learning),
        Some("all") => Ok(ClearTarget::All),
        Some(other) => Err(CliError::InvalidInput(format!(
            "Unknown clear target: {}. Expected results, learning or all",
            other
        ))),
    }
}

fn parse_report_command(args: &[&str]) -> Command {
    let csv = args.contains(&"--csv") || args.contains(&"csv");
    let output = args
        .iter()
        .find(|a| !matches!(**a, "--csv" | "csv"))
        .map(PathBuf::from);
    Command::Report(ReportArgs { csv, output })
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  analyze <claim>                    - Analyze one claim");
    println!("  analyze --file <path>              - Analyze a file, one claim per line");
    println!("  results                            - List the current batch");
    println!("  show <n>                           - Show result n with its keyword trace");
    println!("  confirm <n>                        - Confirm every dimension of result n");
    println!("  correct <n> <dim> <labels> [kw]    - Correct one dimension of result n");
    println!("    dim: efficacy|claim_type|persistence (or 1-3)");
    println!("    labels: comma-separated names, keys or codes");
    println!("    kw: keyword in the claim that indicates the labels");
    println!("  learn <dim> <label> <keyword>      - Register a keyword");
    println!("  remove <dim> <label> <keyword>     - Stop a keyword matching a label");
    println!("  export [file]                      - Export learning state");
    println!("  import <file>                      - Import and merge learning state");
    println!("  clear [results|learning|all]       - Clear state");
    println!("  report [--csv] [file]              - Render a report");
    println!("  stats                              - Batch and learning statistics");
    println!("  labels [dim]                       - List labels");
    println!("  help, ?                            - Show this help");
    println!("  exit, quit, q                      - Exit REPL");
    println!();
}
