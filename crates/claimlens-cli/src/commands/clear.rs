//! Clear command implementation.

use crate::cli::{ClearArgs, ClearTarget};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the clear command.
pub fn execute_clear(args: ClearArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let engine = session.engine_mut();
    match args.target {
        ClearTarget::Learning => engine.clear_learning(),
        ClearTarget::Results => engine.clear_results(),
        ClearTarget::All => {
            engine.clear_learning();
            engine.clear_results();
        }
    }
    session.persist()?;

    let what = match args.target {
        ClearTarget::Learning => "learning state",
        ClearTarget::Results => "results",
        ClearTarget::All => "learning state and results",
    };
    println!("{}", formatter.success(&format!("Cleared {}", what)));
    Ok(())
}
