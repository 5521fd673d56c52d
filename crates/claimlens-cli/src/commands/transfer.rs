//! Export and import of the learning state.

use crate::cli::{ExportArgs, ImportArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use std::fs;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let json = session.engine().export_json()?;
    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            let message = format!("Learning state exported to {}", path.display());
            println!("{}", formatter.success(&message));
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Execute the import command.
pub fn execute_import(
    args: ImportArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let json = fs::read_to_string(&args.file)?;
    let summary = session.engine_mut().import_json(&json)?;
    session.persist()?;

    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} ({} learned keyword(s), {} correction(s) now on record)",
            args.file.display(),
            summary.learned_keywords,
            summary.user_corrections
        ))
    );
    Ok(())
}
