//! Batch reports as a text table or CSV.
//!
//! One row per result followed by a learning-statistics block.

use chrono::{DateTime, Local};
use claimlens_domain::AnalysisResult;
use claimlens_store::LearningSummary;
use std::borrow::Cow;
use tabled::{builder::Builder, settings::Style};

/// Column headers of the result rows.
pub const HEADERS: [&str; 7] = [
    "序号",
    "宣称内容",
    "维度一：功效",
    "维度二：类型",
    "维度三：持续性",
    "置信度",
    "分析时间",
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Text table
    Table,
    /// Comma-separated values
    Csv,
}

/// A report over one batch and the learning state.
#[derive(Debug)]
pub struct Report<'a> {
    results: &'a [AnalysisResult],
    summary: &'a LearningSummary,
    generated_at: DateTime<Local>,
}

impl<'a> Report<'a> {
    /// Create a report generated now.
    pub fn new(results: &'a [AnalysisResult], summary: &'a LearningSummary) -> Self {
        Self {
            results,
            summary,
            generated_at: Local::now(),
        }
    }

    /// Override the generation time.
    pub fn generated_at(mut self, time: DateTime<Local>) -> Self {
        self.generated_at = time;
        self
    }

    /// Render in the given format.
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Table => self.render_table(),
            ReportFormat::Csv => self.render_csv(),
        }
    }

    /// One row of cells per result, in batch order.
    pub fn rows(&self) -> Vec<[String; 7]> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                [
                    (i + 1).to_string(),
                    result.text.clone(),
                    join(result.efficacy.iter().map(|e| e.as_str())),
                    join(result.claim_types.iter().map(|t| t.as_str())),
                    result.persistence.as_str().to_string(),
                    format!("{}%", result.confidence.efficacy_percent()),
                    analysis_time(result),
                ]
            })
            .collect()
    }

    fn stats(&self) -> [(&'static str, String); 3] {
        [
            ("用户纠正次数", self.summary.user_corrections.to_string()),
            ("新学习关键词", self.summary.learned_keywords.to_string()),
            ("当前准确率", format!("{:.0}%", self.summary.accuracy_rate)),
        ]
    }

    fn render_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(HEADERS);
        for row in self.rows() {
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(Style::rounded());

        let mut stats = Builder::default();
        stats.push_record(["学习统计", ""]);
        for (key, value) in self.stats() {
            stats.push_record([key.to_string(), value]);
        }
        stats.push_record([
            "报告生成时间".to_string(),
            self.generated_at.format(TIME_FORMAT).to_string(),
        ]);
        let mut stats = stats.build();
        stats.with(Style::rounded());

        format!("{}\n\n{}", table, stats)
    }

    fn render_csv(&self) -> String {
        let mut lines = vec![csv_line(HEADERS.iter().copied())];
        for row in self.rows() {
            lines.push(csv_line(row.iter().map(String::as_str)));
        }
        lines.push(String::new());
        lines.push(csv_line(["=== 学习统计 ==="]));
        for (key, value) in self.stats() {
            lines.push(csv_line([key, value.as_str()]));
        }
        lines.join("\n")
    }
}

fn join<'s>(labels: impl Iterator<Item = &'s str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

fn analysis_time(result: &AnalysisResult) -> String {
    i64::try_from(result.id.timestamp())
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|t| t.with_timezone(&Local).format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn csv_line<'s>(fields: impl IntoIterator<Item = &'s str>) -> String {
    fields
        .into_iter()
        .map(csv_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field if it holds a separator, quote or line break.
pub fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
