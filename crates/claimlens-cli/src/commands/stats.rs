//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the stats command.
pub fn execute_stats(session: &Session, formatter: &Formatter) -> Result<()> {
    let engine = session.engine();
    println!(
        "{}",
        formatter.format_statistics(&engine.statistics(), &engine.learning_summary())?
    );
    Ok(())
}
