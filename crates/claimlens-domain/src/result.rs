//! Result module - per-claim classification outcomes

use crate::{ClaimType, Dimension, DimensionConfidence, Efficacy, Label, Persistence};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for an analysis result based on UUIDv7
///
/// Results of one batch share the UUIDv7 high bits (timestamp and random
/// prefix) and carry their line index in the low 32 bits, so ids sort in
/// input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultId(u128);

impl ResultId {
    const INDEX_MASK: u128 = 0xFFFF_FFFF;

    /// Generate a new standalone ResultId
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::ResultId;
    ///
    /// let id = ResultId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Generate `count` order-preserving ids for one batch
    ///
    /// # Examples
    ///
    /// ```
    /// use claimlens_domain::ResultId;
    ///
    /// let ids = ResultId::batch(3);
    /// assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    /// ```
    pub fn batch(count: usize) -> Vec<Self> {
        let base = uuid::Uuid::now_v7().as_u128() & !Self::INDEX_MASK;
        (0..count)
            .map(|index| Self(base | (index as u128 & Self::INDEX_MASK)))
            .collect()
    }

    /// Create a ResultId from a raw u128 value
    ///
    /// This is primarily for session-file deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ResultId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid result id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since Unix epoch at which the batch was analyzed
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ResultId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl std::str::FromStr for ResultId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl Serialize for ResultId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepted wire forms: the UUID string, or a bare integer as written by
/// older tools that keyed results by millisecond timestamp
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultIdWire {
    Uuid(String),
    Millis(u64),
}

impl<'de> Deserialize<'de> for ResultId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ResultIdWire::deserialize(deserializer)? {
            ResultIdWire::Uuid(s) => Self::from_string(&s).map_err(serde::de::Error::custom),
            ResultIdWire::Millis(value) => Ok(Self::from_value(u128::from(value))),
        }
    }
}

/// One keyword hit
///
/// Produced during classification and replayed by the feedback loop to
/// reinforce or penalize the keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The keyword that was found in the claim text
    pub keyword: String,
    /// The label the keyword voted for
    pub label: Label,
}

impl MatchRecord {
    /// Create a new match record
    pub fn new(keyword: impl Into<String>, label: impl Into<Label>) -> Self {
        Self {
            keyword: keyword.into(),
            label: label.into(),
        }
    }

    /// Dimension of the matched label
    pub fn dimension(&self) -> Dimension {
        self.label.dimension()
    }
}

/// The value held by one dimension of a result
///
/// Sets for the multi-valued dimensions, a single label for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum DimensionValue {
    /// Dimension 1 labels
    Efficacy(BTreeSet<Efficacy>),
    /// Dimension 2 labels
    ClaimType(BTreeSet<ClaimType>),
    /// Dimension 3 label
    Persistence(Persistence),
}

impl DimensionValue {
    /// Dimension of this value
    pub fn dimension(&self) -> Dimension {
        match self {
            DimensionValue::Efficacy(_) => Dimension::Efficacy,
            DimensionValue::ClaimType(_) => Dimension::ClaimType,
            DimensionValue::Persistence(_) => Dimension::Persistence,
        }
    }

    /// Labels held, as a list (a single element for persistence)
    pub fn labels(&self) -> Vec<Label> {
        match self {
            DimensionValue::Efficacy(set) => set.iter().copied().map(Label::Efficacy).collect(),
            DimensionValue::ClaimType(set) => set.iter().copied().map(Label::ClaimType).collect(),
            DimensionValue::Persistence(p) => vec![Label::Persistence(*p)],
        }
    }

    /// Whether the value contains (or, for persistence, equals) the label
    pub fn contains(&self, label: &Label) -> bool {
        match (self, label) {
            (DimensionValue::Efficacy(set), Label::Efficacy(e)) => set.contains(e),
            (DimensionValue::ClaimType(set), Label::ClaimType(t)) => set.contains(t),
            (DimensionValue::Persistence(p), Label::Persistence(q)) => p == q,
            _ => false,
        }
    }

    /// Whether a multi-valued dimension holds no labels
    pub fn is_empty(&self) -> bool {
        match self {
            DimensionValue::Efficacy(set) => set.is_empty(),
            DimensionValue::ClaimType(set) => set.is_empty(),
            DimensionValue::Persistence(_) => false,
        }
    }

    /// Build a value from labels, normalizing to the dimension's shape
    ///
    /// # Errors
    ///
    /// Returns an error if a label belongs to another dimension, if no label
    /// is given, or if more than one distinct label is given for persistence.
    pub fn from_labels(dimension: Dimension, labels: &[Label]) -> Result<Self, String> {
        if labels.is_empty() {
            return Err(format!("At least one {} label is required", dimension));
        }
        if let Some(stray) = labels.iter().find(|l| l.dimension() != dimension) {
            return Err(format!(
                "Label '{}' does not belong to dimension {}",
                stray, dimension
            ));
        }

        match dimension {
            Dimension::Efficacy => Ok(DimensionValue::Efficacy(
                labels
                    .iter()
                    .filter_map(|l| match l {
                        Label::Efficacy(e) => Some(*e),
                        _ => None,
                    })
                    .collect(),
            )),
            Dimension::ClaimType => Ok(DimensionValue::ClaimType(
                labels
                    .iter()
                    .filter_map(|l| match l {
                        Label::ClaimType(t) => Some(*t),
                        _ => None,
                    })
                    .collect(),
            )),
            Dimension::Persistence => {
                let distinct: BTreeSet<Label> = labels.iter().copied().collect();
                match (distinct.len(), distinct.into_iter().next()) {
                    (1, Some(Label::Persistence(p))) => Ok(DimensionValue::Persistence(p)),
                    _ => Err("Persistence takes exactly one label".to_string()),
                }
            }
        }
    }

    /// Parse label names for a dimension and normalize them
    pub fn parse(dimension: Dimension, names: &[&str]) -> Result<Self, String> {
        let labels = names
            .iter()
            .map(|name| {
                Label::parse(dimension, name)
                    .ok_or_else(|| format!("Unknown {} label: {}", dimension, name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(dimension, &labels)
    }

    /// Labels joined with ", " for display
    pub fn display(&self) -> String {
        self.labels()
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of classifying one claim text, before it is given an identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Matched efficacy labels, or `{Other}`
    pub efficacy: BTreeSet<Efficacy>,
    /// Matched claim types, or `{UsageFeel}`
    pub claim_types: BTreeSet<ClaimType>,
    /// First matching persistence label, or `Immediate`
    pub persistence: Persistence,
    /// Per-dimension confidence
    pub confidence: DimensionConfidence,
    /// Every keyword hit, in evaluation order
    pub matched: Vec<MatchRecord>,
}

/// One analyzed claim line
///
/// Created by the classifier; afterwards only a user correction may
/// overwrite a dimension's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Order-preserving identifier
    pub id: ResultId,

    /// The claim text (trimmed)
    pub text: String,

    /// Dimension 1 labels (never empty)
    pub efficacy: BTreeSet<Efficacy>,

    /// Dimension 2 labels (never empty)
    pub claim_types: BTreeSet<ClaimType>,

    /// Dimension 3 label
    pub persistence: Persistence,

    /// Per-dimension confidence
    pub confidence: DimensionConfidence,

    /// Keyword trace
    pub matched: Vec<MatchRecord>,

    /// Unmatched tokens offered as keyword candidates
    #[serde(default)]
    pub suggested_keywords: Vec<String>,
}

impl AnalysisResult {
    /// Wrap a classification with its identity and suggestions
    pub fn new(
        id: ResultId,
        text: impl Into<String>,
        classification: Classification,
        suggested_keywords: Vec<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            efficacy: classification.efficacy,
            claim_types: classification.claim_types,
            persistence: classification.persistence,
            confidence: classification.confidence,
            matched: classification.matched,
            suggested_keywords,
        }
    }

    /// Claim text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Dimension 1 confidence
    pub fn efficacy_confidence(&self) -> f64 {
        self.confidence.efficacy
    }

    /// Current value of a dimension
    pub fn value(&self, dimension: Dimension) -> DimensionValue {
        match dimension {
            Dimension::Efficacy => DimensionValue::Efficacy(self.efficacy.clone()),
            Dimension::ClaimType => DimensionValue::ClaimType(self.claim_types.clone()),
            Dimension::Persistence => DimensionValue::Persistence(self.persistence),
        }
    }

    /// Overwrite one dimension with a corrected value
    pub fn set_value(&mut self, value: DimensionValue) {
        match value {
            DimensionValue::Efficacy(set) => self.efficacy = set,
            DimensionValue::ClaimType(set) => self.claim_types = set,
            DimensionValue::Persistence(p) => self.persistence = p,
        }
    }

    /// Match records belonging to one dimension
    pub fn matches_for(&self, dimension: Dimension) -> impl Iterator<Item = &MatchRecord> {
        self.matched.iter().filter(move |m| m.dimension() == dimension)
    }
}
