//! Command implementations.

pub mod analyze;
pub mod clear;
pub mod feedback;
pub mod keywords;
pub mod labels;
pub mod report;
pub mod stats;
pub mod transfer;

pub use self::analyze::{execute_analyze, execute_results, execute_show};
pub use self::clear::execute_clear;
pub use self::feedback::{execute_confirm, execute_correct};
pub use self::keywords::{execute_learn, execute_remove};
pub use self::labels::execute_labels;
pub use self::report::execute_report;
pub use self::stats::execute_stats;
pub use self::transfer::{execute_export, execute_import};

use crate::error::{CliError, Result};
use claimlens_domain::{Dimension, Label};

/// Parse a dimension argument.
pub(crate) fn parse_dimension(s: &str) -> Result<Dimension> {
    Dimension::parse(s).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown dimension '{}'. Expected efficacy, claim_type or persistence",
            s
        ))
    })
}

/// Parse a label within a dimension.
pub(crate) fn parse_label(dimension: Dimension, s: &str) -> Result<Label> {
    Label::parse(dimension, s).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown {} label '{}'. Use 'labels {}' to list them",
            dimension, s, dimension
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{Efficacy, Persistence};

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("2").unwrap(), Dimension::ClaimType);
        assert_eq!(parse_dimension("持续性").unwrap(), Dimension::Persistence);
        assert!(matches!(parse_dimension("colour"), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_label_by_name_key_or_code() {
        let expected: Label = Efficacy::Moisturizing.into();
        assert_eq!(parse_label(Dimension::Efficacy, "保湿").unwrap(), expected);
        assert_eq!(parse_label(Dimension::Efficacy, "moisturizing").unwrap(), expected);
        assert_eq!(parse_label(Dimension::Efficacy, "11").unwrap(), expected);
        assert_eq!(
            parse_label(Dimension::Persistence, "持久").unwrap(),
            Label::Persistence(Persistence::Durable)
        );
        assert!(parse_label(Dimension::Persistence, "保湿").is_err());
    }
}
