//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use claimlens_classifier::BatchStatistics;
use claimlens_domain::{AnalysisResult, Dimension, Label};
use claimlens_store::LearningSummary;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const TEXT_WIDTH: usize = 24;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a batch of results.
    pub fn format_results(&self, results: &[AnalysisResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
            OutputFormat::Table => Ok(self.format_results_table(results)),
            OutputFormat::Quiet => Ok(self.format_results_quiet(results)),
        }
    }

    /// Format a single result with its keyword trace.
    pub fn format_result_detail(&self, position: usize, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(quiet_line(position, result)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Dimension", "Labels", "Confidence", "Matched keywords"]);
                for dimension in Dimension::ALL {
                    let matched = result
                        .matches_for(dimension)
                        .map(|m| format!("{} → {}", m.keyword, m.label))
                        .collect::<Vec<_>>()
                        .join("\n");
                    builder.push_record([
                        dimension.display_name().to_string(),
                        result.value(dimension).display(),
                        format!("{:.2}", result.confidence.get(dimension)),
                        matched,
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut out = format!("#{} {}\n{}", position, result.text, table);
                if !result.suggested_keywords.is_empty() {
                    out.push('\n');
                    out.push_str(&self.info(&format!(
                        "Suggested keywords: {}",
                        result.suggested_keywords.join(", ")
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format results as a table.
    fn format_results_table(&self, results: &[AnalysisResult]) -> String {
        if results.is_empty() {
            return self.colorize("No results.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Claim", "Efficacy", "Type", "Persistence", "Confidence"]);

        for (i, result) in results.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                truncate(&result.text, TEXT_WIDTH),
                result.value(Dimension::Efficacy).display(),
                result.value(Dimension::ClaimType).display(),
                result.persistence.to_string(),
                format!("{}%", result.confidence.efficacy_percent()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format results in quiet mode (labels only).
    fn format_results_quiet(&self, results: &[AnalysisResult]) -> String {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| quiet_line(i + 1, r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format batch statistics and the learning summary.
    pub fn format_statistics(
        &self,
        batch: &BatchStatistics,
        learning: &LearningSummary,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "batch": batch,
                    "learning": {
                        "userCorrections": learning.user_corrections,
                        "learnedKeywords": learning.learned_keywords,
                        "removedKeywords": learning.removed_keywords,
                        "scoredKeywords": learning.scored_keywords,
                        "feedbackActions": learning.feedback_actions,
                        "accuracyRate": learning.accuracy_rate,
                        "lastUpdated": learning.last_updated,
                    }
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(format!(
                "{} {} {:.0}",
                batch.total, learning.learned_keywords, learning.accuracy_rate
            )),
            OutputFormat::Table => {
                let mut out = String::new();
                if batch.total > 0 {
                    out.push_str(&batch.summary());
                    out.push_str("\n\n");
                }
                out.push_str(&learning.summary());
                Ok(out)
            }
        }
    }

    /// Format the label catalogue of some dimensions.
    pub fn format_labels(&self, dimensions: &[Dimension]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value: Vec<serde_json::Value> = dimensions
                    .iter()
                    .flat_map(|d| Label::all(*d))
                    .map(|label| {
                        serde_json::json!({
                            "dimension": label.dimension().as_str(),
                            "label": label.as_str(),
                            "key": label.key(),
                            "code": label.code(),
                            "description": label.description(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(dimensions
                .iter()
                .flat_map(|d| Label::all(*d))
                .map(|label| label.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Dimension", "Code", "Label", "Key", "Description"]);
                for dimension in dimensions {
                    for label in Label::all(*dimension) {
                        builder.push_record([
                            dimension.display_name(),
                            label.code().unwrap_or("-"),
                            label.as_str(),
                            label.key(),
                            label.description().unwrap_or(""),
                        ]);
                    }
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn quiet_line(position: usize, result: &AnalysisResult) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        position,
        result.value(Dimension::Efficacy).display(),
        result.value(Dimension::ClaimType).display(),
        result.persistence
    )
}

/// Shorten text to `width` characters.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_classifier::{Classifier, PatternDictionary};

    fn results() -> Vec<AnalysisResult> {
        Classifier::default_config()
            .analyze("长效保湿\n美白淡斑", &PatternDictionary::base())
            .unwrap()
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_results(&results()).unwrap();
        assert!(output.contains("\"efficacy\""));
        assert!(output.contains("\"matched\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_results(&results()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1\t保湿"));
        assert!(lines[0].ends_with("持久"));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_results(&results()).unwrap();
        assert!(output.contains("Efficacy"));
        assert!(output.contains("美白"));
    }

    #[test]
    fn test_empty_results() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_results(&[]).unwrap();
        assert!(output.contains("No results"));
    }

    #[test]
    fn test_detail_lists_matched_keywords() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let results = results();
        let output = formatter.format_result_detail(1, &results[0]).unwrap();
        assert!(output.starts_with("#1 长效保湿"));
        assert!(output.contains("长效 → 持久"));
    }

    #[test]
    fn test_labels_catalogue() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_labels(&[Dimension::Persistence]).unwrap();
        assert_eq!(output, "即时\n持久");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("长效保湿", 10), "长效保湿");
        assert_eq!(truncate("该产品24小时长效保湿", 5), "该产品2…");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
