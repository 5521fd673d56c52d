//! Learn and remove commands.

use super::{parse_dimension, parse_label};
use crate::cli::KeywordArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use claimlens_domain::Label;

fn label_of(args: &KeywordArgs) -> Result<Label> {
    let dimension = parse_dimension(&args.dimension)?;
    parse_label(dimension, &args.label)
}

/// Execute the learn command.
pub fn execute_learn(
    args: KeywordArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let label = label_of(&args)?;
    let added = session.engine_mut().learn(label, &args.keyword)?;
    session.persist()?;

    if added {
        let message = format!("Learned '{}' for {}", args.keyword.trim(), label);
        println!("{}", formatter.success(&message));
    } else {
        let message = format!("'{}' is already a keyword of {}", args.keyword.trim(), label);
        println!("{}", formatter.warning(&message));
    }
    Ok(())
}

/// Execute the remove command.
pub fn execute_remove(
    args: KeywordArgs,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let label = label_of(&args)?;
    let was_learned = session.engine_mut().remove(label, &args.keyword)?;
    session.persist()?;

    let message = if was_learned {
        format!("Removed learned keyword '{}' from {}", args.keyword.trim(), label)
    } else {
        format!("'{}' will no longer match {}", args.keyword.trim(), label)
    };
    println!("{}", formatter.success(&message));
    Ok(())
}
