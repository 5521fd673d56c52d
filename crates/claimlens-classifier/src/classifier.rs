//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::dictionary::PatternDictionary;
use crate::suggest::suggest_keywords;
use claimlens_domain::{
    ClaimType, Classification, Dimension, DimensionConfidence, Efficacy, Label, MatchRecord,
    Persistence,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Efficacy confidence when nothing matched
pub const EFFICACY_FALLBACK_CONFIDENCE: f64 = 0.1;
/// Efficacy confidence before any match is counted
pub const EFFICACY_BASE_CONFIDENCE: f64 = 0.5;
/// Efficacy confidence added per distinct matched label
pub const EFFICACY_CONFIDENCE_STEP: f64 = 0.2;
/// Efficacy confidence cap
pub const EFFICACY_MAX_CONFIDENCE: f64 = 0.9;
/// Claim-type confidence with at least one match
pub const CLAIM_TYPE_MATCH_CONFIDENCE: f64 = 0.8;
/// Claim-type confidence when nothing matched
pub const CLAIM_TYPE_FALLBACK_CONFIDENCE: f64 = 0.3;
/// Persistence confidence when a cue matched
pub const PERSISTENCE_MATCH_CONFIDENCE: f64 = 0.8;

/// Keyword classifier for claim texts
///
/// Classification itself is a pure function of the text and the dictionary;
/// the configuration only shapes suggestions and batch limits.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with default configuration
    pub fn default_config() -> Self {
        Self::new(ClassifierConfig::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one claim along all three dimensions
    ///
    /// Keywords match by case-insensitive containment. Every efficacy and
    /// claim-type hit is recorded; persistence takes the first entry in table
    /// order with a hit and records only its first matching keyword.
    pub fn classify(&self, text: &str, dictionary: &PatternDictionary) -> Classification {
        let lowered = text.to_lowercase();
        let mut matched = Vec::new();

        let mut efficacy = BTreeSet::new();
        for (label, keyword) in hits(&lowered, dictionary, Dimension::Efficacy) {
            if let Label::Efficacy(e) = label {
                efficacy.insert(e);
            }
            matched.push(MatchRecord::new(keyword, label));
        }

        let mut claim_types = BTreeSet::new();
        for (label, keyword) in hits(&lowered, dictionary, Dimension::ClaimType) {
            if let Label::ClaimType(t) = label {
                claim_types.insert(t);
            }
            matched.push(MatchRecord::new(keyword, label));
        }

        let persistence_hit = dictionary
            .entries(Dimension::Persistence)
            .iter()
            .find_map(|entry| {
                entry
                    .keywords
                    .iter()
                    .find(|kw| contains_keyword(&lowered, kw))
                    .and_then(|kw| match entry.label {
                        Label::Persistence(p) => Some((p, kw.clone())),
                        _ => None,
                    })
            });

        let efficacy_confidence = if efficacy.is_empty() {
            efficacy.insert(Efficacy::Other);
            EFFICACY_FALLBACK_CONFIDENCE
        } else {
            (EFFICACY_BASE_CONFIDENCE + EFFICACY_CONFIDENCE_STEP * efficacy.len() as f64)
                .min(EFFICACY_MAX_CONFIDENCE)
        };

        let claim_type_confidence = if claim_types.is_empty() {
            claim_types.insert(ClaimType::UsageFeel);
            CLAIM_TYPE_FALLBACK_CONFIDENCE
        } else {
            CLAIM_TYPE_MATCH_CONFIDENCE
        };

        let (persistence, persistence_confidence) = match persistence_hit {
            Some((p, keyword)) => {
                matched.push(MatchRecord::new(keyword, p));
                (p, PERSISTENCE_MATCH_CONFIDENCE)
            }
            None => (Persistence::Immediate, DimensionConfidence::UNSET),
        };

        debug!(
            efficacy = efficacy.len(),
            claim_types = claim_types.len(),
            %persistence,
            hits = matched.len(),
            "classified claim"
        );

        Classification {
            efficacy,
            claim_types,
            persistence,
            confidence: DimensionConfidence {
                efficacy: efficacy_confidence,
                claim_type: claim_type_confidence,
                persistence: persistence_confidence,
            },
            matched,
        }
    }

    /// Unmatched tokens of a claim, offered as keyword candidates
    ///
    /// Suggestions are de-duplicated and keep tokens of at least
    /// `min_token_chars` characters (2 by default). The legacy behaviour
    /// kept every token longer than 2 characters, repeats included;
    /// [`ClassifierConfig::legacy`] restores the length rule only.
    pub fn suggest(&self, text: &str, dictionary: &PatternDictionary) -> Vec<String> {
        suggest_keywords(
            text,
            dictionary,
            self.config.min_token_chars,
            self.config.max_suggestions,
        )
    }
}

/// Every (label, keyword) hit of a dimension, in dictionary order
fn hits<'a>(
    lowered: &'a str,
    dictionary: &'a PatternDictionary,
    dimension: Dimension,
) -> impl Iterator<Item = (Label, &'a str)> + 'a {
    dictionary.entries(dimension).iter().flat_map(move |entry| {
        entry
            .keywords
            .iter()
            .filter(move |kw| contains_keyword(lowered, kw))
            .map(move |kw| (entry.label, kw.as_str()))
    })
}

fn contains_keyword(lowered_text: &str, keyword: &str) -> bool {
    !keyword.is_empty() && lowered_text.contains(&keyword.to_lowercase())
}
