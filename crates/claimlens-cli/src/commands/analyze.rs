//! Analyze, results and show commands.

use crate::cli::{AnalyzeArgs, IndexArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use std::fs;
use std::io::{self, Read};

/// Execute the analyze command.
pub fn execute_analyze(
    args: AnalyzeArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let input = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = args.file {
        fs::read_to_string(path)?
    } else if let Some(text) = args.text {
        text
    } else {
        return Err(CliError::InvalidInput(
            "Provide claim text, --file or --stdin".to_string(),
        ));
    };

    // Blank input also clears the saved batch
    let outcome = session.engine_mut().analyze(&input).map(|r| r.len());
    session.persist()?;
    let count = outcome?;

    println!("{}", formatter.format_results(session.engine().results())?);
    println!("{}", formatter.success(&format!("Analyzed {} claim(s)", count)));
    Ok(())
}

/// Execute the results command.
pub fn execute_results(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_results(session.engine().results())?);
    Ok(())
}

/// Execute the show command.
pub fn execute_show(args: IndexArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let engine = session.engine();
    if engine.results().is_empty() {
        return Err(CliError::NoResults);
    }
    let id = engine.id_at(args.index)?;
    let result = engine.result(id).ok_or(CliError::NoResults)?;
    println!("{}", formatter.format_result_detail(args.index, result)?);
    Ok(())
}
