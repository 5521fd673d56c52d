//! Report command implementation.

use crate::cli::ReportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::report::{Report, ReportFormat};
use crate::session::Session;
use std::fs;

/// Execute the report command.
pub fn execute_report(args: ReportArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let engine = session.engine();
    if engine.results().is_empty() {
        return Err(CliError::NoResults);
    }

    let format = if args.csv { ReportFormat::Csv } else { ReportFormat::Table };
    let summary = engine.learning_summary();
    let rendered = Report::new(engine.results(), &summary).render(format);

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!("{}", formatter.success(&format!("Report written to {}", path.display())));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
