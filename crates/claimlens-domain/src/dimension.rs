//! Dimension module - the three independent classification axes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classification axis
///
/// Each claim is classified along all three dimensions independently:
/// - Efficacy: what the product does (multi-valued)
/// - ClaimType: how the claim is phrased (multi-valued)
/// - Persistence: immediate vs. durable effect (single-valued)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Dimension 1: efficacy category
    #[serde(alias = "功效", alias = "dimension1")]
    Efficacy,

    /// Dimension 2: claim-type category
    #[serde(alias = "类型", alias = "dimension2")]
    ClaimType,

    /// Dimension 3: persistence
    #[serde(alias = "持续性", alias = "dimension3")]
    Persistence,
}

impl Dimension {
    /// All dimensions in evaluation order
    pub const ALL: [Dimension; 3] = [
        Dimension::Efficacy,
        Dimension::ClaimType,
        Dimension::Persistence,
    ];

    /// Get the dimension name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Efficacy => "efficacy",
            Dimension::ClaimType => "claim_type",
            Dimension::Persistence => "persistence",
        }
    }

    /// Display name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Efficacy => "功效",
            Dimension::ClaimType => "类型",
            Dimension::Persistence => "持续性",
        }
    }

    /// One-based ordinal ("dimension 1" .. "dimension 3")
    pub fn ordinal(&self) -> u8 {
        match self {
            Dimension::Efficacy => 1,
            Dimension::ClaimType => 2,
            Dimension::Persistence => 3,
        }
    }

    /// Whether the dimension holds a set of labels rather than exactly one
    pub fn is_multi_valued(&self) -> bool {
        !matches!(self, Dimension::Persistence)
    }

    /// Parse a dimension from its name, ordinal, or display name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "efficacy" | "1" | "dimension1" | "d1" | "功效" => Some(Dimension::Efficacy),
            "claim_type" | "claim-type" | "type" | "2" | "dimension2" | "d2" | "类型" => {
                Some(Dimension::ClaimType)
            }
            "persistence" | "3" | "dimension3" | "d3" | "持续性" => Some(Dimension::Persistence),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid dimension: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Dimension::parse("efficacy"), Some(Dimension::Efficacy));
        assert_eq!(Dimension::parse("2"), Some(Dimension::ClaimType));
        assert_eq!(Dimension::parse("持续性"), Some(Dimension::Persistence));
        assert_eq!(Dimension::parse("Dimension3"), Some(Dimension::Persistence));
        assert_eq!(Dimension::parse("colour"), None);
    }

    #[test]
    fn test_multi_valued() {
        assert!(Dimension::Efficacy.is_multi_valued());
        assert!(Dimension::ClaimType.is_multi_valued());
        assert!(!Dimension::Persistence.is_multi_valued());
    }

    #[test]
    fn test_serde_accepts_legacy_keys() {
        let d: Dimension = serde_json::from_str("\"功效\"").unwrap();
        assert_eq!(d, Dimension::Efficacy);
        let d: Dimension = serde_json::from_str("\"claim_type\"").unwrap();
        assert_eq!(d, Dimension::ClaimType);
        assert_eq!(serde_json::to_string(&Dimension::Persistence).unwrap(), "\"persistence\"");
    }
}
