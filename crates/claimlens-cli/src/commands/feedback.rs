//! Confirm and correct commands.

use super::{parse_dimension, parse_label};
use crate::cli::{CorrectArgs, IndexArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use claimlens_domain::{DimensionValue, Label};

/// Execute the confirm command.
pub fn execute_confirm(
    args: IndexArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    if session.engine().results().is_empty() {
        return Err(CliError::NoResults);
    }
    let id = session.engine().id_at(args.index)?;
    let outcome = session.engine_mut().confirm(id)?;
    session.persist()?;

    println!(
        "{}",
        formatter.success(&format!(
            "Confirmed #{} ({} keyword(s) reinforced)",
            args.index,
            outcome.reinforced.len()
        ))
    );
    Ok(())
}

/// Execute the correct command.
pub fn execute_correct(
    args: CorrectArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    if session.engine().results().is_empty() {
        return Err(CliError::NoResults);
    }
    let dimension = parse_dimension(&args.dimension)?;
    let labels = args
        .labels
        .iter()
        .map(|name| parse_label(dimension, name))
        .collect::<Result<Vec<Label>>>()?;
    let value = DimensionValue::from_labels(dimension, &labels).map_err(CliError::InvalidInput)?;

    let id = session.engine().id_at(args.index)?;
    let outcome = session
        .engine_mut()
        .correct(id, value, args.keyword.as_deref())?;
    session.persist()?;

    println!(
        "{}",
        formatter.success(&format!(
            "Corrected #{} {} ({:?}, {} keyword score(s) adjusted)",
            args.index,
            dimension.display_name(),
            outcome.correction_type,
            outcome.adjusted.len()
        ))
    );
    if let Some(keyword) = args.keyword.as_deref() {
        if outcome.registered.is_empty() {
            let message = format!("'{}' was already registered", keyword.trim());
            println!("{}", formatter.warning(&message));
        } else {
            println!(
                "{}",
                formatter.info(&format!(
                    "Learned '{}' for {} label(s)",
                    keyword.trim(),
                    outcome.registered.len()
                ))
            );
        }
    }
    Ok(())
}
