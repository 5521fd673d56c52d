//! Effective pattern dictionary
//!
//! A per-pass view of the keywords used for classification: the base table
//! plus learned keywords, minus tombstoned ones. Rebuilt from the learning
//! state before each classification run.

use crate::base;
use claimlens_domain::{Dimension, KeywordOverlay, Label};
use regex::{Regex, RegexSet};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Where a pattern entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Built-in base table (keywords may be regex fragments for suggestions)
    Base,
    /// Learned keywords (always literal)
    Learned,
}

/// A label with its alternative trigger keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// Label voted for when any keyword matches
    pub label: Label,
    /// Alternative keywords, in evaluation order
    pub keywords: Vec<String>,
    /// Base table or learned overlay
    pub origin: EntryOrigin,
}

/// Dimension → ordered pattern entries
#[derive(Debug, Clone)]
pub struct PatternDictionary {
    entries: BTreeMap<Dimension, Vec<PatternEntry>>,
    suggestion_filter: RegexSet,
}

impl PatternDictionary {
    /// The base table alone
    pub fn base() -> Self {
        Self::build(&claimlens_domain::EmptyOverlay, true)
    }

    /// Build the effective dictionary from the base table and an overlay
    ///
    /// Learned keywords of a label are appended as one additional entry after
    /// the base entries of that dimension, minus tombstoned keywords. Labels
    /// whose active set is empty produce no entry. With
    /// `filter_base_tombstones` the tombstones also remove base keywords.
    /// Never fails.
    pub fn build<O: KeywordOverlay + ?Sized>(overlay: &O, filter_base_tombstones: bool) -> Self {
        let mut entries: BTreeMap<Dimension, Vec<PatternEntry>> = BTreeMap::new();

        for (label, keywords) in base::rows() {
            let keywords: Vec<String> = keywords
                .iter()
                .filter(|kw| !(filter_base_tombstones && overlay.is_removed(label, kw)))
                .map(|kw| kw.to_string())
                .collect();
            if keywords.is_empty() {
                continue;
            }
            entries.entry(label.dimension()).or_default().push(PatternEntry {
                label,
                keywords,
                origin: EntryOrigin::Base,
            });
        }

        for dimension in Dimension::ALL {
            for (label, learned) in overlay.learned_keywords(dimension) {
                if label.dimension() != dimension {
                    warn!(
                        %label,
                        %dimension,
                        "skipping learned keywords filed under the wrong dimension"
                    );
                    continue;
                }
                let active: Vec<String> = learned
                    .into_iter()
                    .filter(|kw| !kw.trim().is_empty() && !overlay.is_removed(label, kw))
                    .collect();
                if active.is_empty() {
                    continue;
                }
                debug!(%label, count = active.len(), "adding learned keyword entry");
                entries.entry(dimension).or_default().push(PatternEntry {
                    label,
                    keywords: active,
                    origin: EntryOrigin::Learned,
                });
            }
        }

        let suggestion_filter = compile_suggestion_filter(&entries);
        Self {
            entries,
            suggestion_filter,
        }
    }

    /// Entries of one dimension, in evaluation order
    pub fn entries(&self, dimension: Dimension) -> &[PatternEntry] {
        self.entries.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of keywords across all entries of a dimension
    pub fn keyword_count(&self, dimension: Dimension) -> usize {
        self.entries(dimension).iter().map(|e| e.keywords.len()).sum()
    }

    /// Whether any label would be attributed through this keyword
    pub fn contains_keyword(&self, label: Label, keyword: &str) -> bool {
        self.entries(label.dimension())
            .iter()
            .filter(|e| e.label == label)
            .any(|e| e.keywords.iter().any(|k| k == keyword))
    }

    /// Whether a token matches any keyword pattern of any dimension
    pub fn matches_any_pattern(&self, token: &str) -> bool {
        self.suggestion_filter.is_match(token)
    }
}

/// One case-insensitive pattern per keyword
///
/// Base keywords keep their regex meaning; learned keywords are escaped so
/// user input is never reinterpreted as regex syntax.
fn compile_suggestion_filter(entries: &BTreeMap<Dimension, Vec<PatternEntry>>) -> RegexSet {
    let patterns: Vec<String> = entries
        .values()
        .flatten()
        .flat_map(|entry| {
            entry.keywords.iter().map(move |kw| match entry.origin {
                EntryOrigin::Base if Regex::new(kw).is_ok() => format!("(?i){}", kw),
                _ => format!("(?i){}", regex::escape(kw)),
            })
        })
        .collect();

    match RegexSet::new(&patterns) {
        Ok(set) => set,
        Err(e) => {
            warn!(
                error = %e,
                "suggestion filter failed to compile; suggestions will not be filtered"
            );
            RegexSet::empty()
        }
    }
}
