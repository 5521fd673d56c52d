//! Multi-line batch analysis and batch statistics

use crate::classifier::Classifier;
use crate::dictionary::PatternDictionary;
use crate::error::ClassifierError;
use claimlens_domain::{AnalysisResult, ClaimType, Efficacy, Persistence, ResultId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Split input into trimmed, non-blank claim lines
pub fn split_claims(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

impl Classifier {
    /// Classify every non-blank line of `input`, in input order
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::TextTooLong`] if the input exceeds the configured
    ///   maximum length
    /// - [`ClassifierError::EmptyInput`] if no non-blank line remains
    pub fn analyze(
        &self,
        input: &str,
        dictionary: &PatternDictionary,
    ) -> Result<Vec<AnalysisResult>, ClassifierError> {
        let length = input.chars().count();
        if length > self.config().max_text_length {
            return Err(ClassifierError::TextTooLong(
                length,
                self.config().max_text_length,
            ));
        }

        let lines = split_claims(input);
        if lines.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let ids = ResultId::batch(lines.len());
        let results: Vec<AnalysisResult> = lines
            .iter()
            .zip(ids)
            .map(|(line, id)| {
                let classification = self.classify(line, dictionary);
                let suggestions = self.suggest(line, dictionary);
                AnalysisResult::new(id, *line, classification, suggestions)
            })
            .collect();

        info!("Analyzed {} claims", results.len());
        Ok(results)
    }
}

/// Per-dimension label histograms over one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// Number of results
    pub total: usize,
    /// Results carrying each efficacy label
    pub efficacy: BTreeMap<Efficacy, usize>,
    /// Results carrying each claim type
    pub claim_types: BTreeMap<ClaimType, usize>,
    /// Results per persistence label
    pub persistence: BTreeMap<Persistence, usize>,
}

impl BatchStatistics {
    /// Count labels across a batch
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            for e in &result.efficacy {
                *stats.efficacy.entry(*e).or_insert(0) += 1;
            }
            for t in &result.claim_types {
                *stats.claim_types.entry(*t).or_insert(0) += 1;
            }
            *stats.persistence.entry(result.persistence).or_insert(0) += 1;
        }
        stats
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let top = |counts: Vec<(String, usize)>| {
            counts
                .into_iter()
                .map(|(label, n)| format!("{} {}", label, n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Claims: {} | Efficacy: [{}] | Claim types: [{}] | Persistence: [{}]",
            self.total,
            top(self.efficacy.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
            top(self.claim_types.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
            top(self.persistence.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_claims_trims_and_skips_blank_lines() {
        let lines = split_claims("  第一行 \n\n   \n第二行\r\n");
        assert_eq!(lines, vec!["第一行", "第二行"]);
    }

    #[test]
    fn test_statistics_histograms() {
        let classifier = Classifier::default_config();
        let dict = PatternDictionary::base();
        let results = classifier.analyze("保湿\n补水美白\nxyz", &dict).unwrap();

        let stats = BatchStatistics::from_results(&results);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.efficacy.get(&Efficacy::Moisturizing), Some(&2));
        assert_eq!(stats.efficacy.get(&Efficacy::Whitening), Some(&1));
        assert_eq!(stats.efficacy.get(&Efficacy::Other), Some(&1));
        assert_eq!(stats.persistence.values().sum::<usize>(), 3);
        assert!(stats.summary().contains("Claims: 3"));
    }
}
