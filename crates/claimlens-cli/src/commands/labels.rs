//! Labels command implementation.

use super::parse_dimension;
use crate::cli::LabelsArgs;
use crate::error::Result;
use crate::output::Formatter;
use claimlens_domain::Dimension;

/// Execute the labels command.
pub fn execute_labels(args: LabelsArgs, formatter: &Formatter) -> Result<()> {
    let dimensions = match args.dimension {
        Some(name) => vec![parse_dimension(&name)?],
        None => Dimension::ALL.to_vec(),
    };
    println!("{}", formatter.format_labels(&dimensions)?);
    Ok(())
}
