use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ItemId;

/// One page of a paginated listing.
///
/// Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count,
        }
    }

    /// Check whether pages after this one exist.
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total_count
    }
}

/// Pre-aggregated statistics for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalytics {
    pub question_id: ItemId,

    pub question_text: String,

    /// The question's type name as reported by the analytics service.
    #[serde(default)]
    pub type_name: String,

    #[serde(default)]
    pub total_responses: u64,

    pub summary: AnalyticsSummary,
}

/// The type-specific part of a question's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsSummary {
    /// Counts per option (multiple choice, checkboxes, dropdown).
    Choice { options: Vec<OptionStat> },

    /// Distribution over scale points.
    Scale {
        distribution: Vec<ScaleBucket>,
        average: Option<f64>,
    },

    /// Counts per column for each row.
    Grid { rows: Vec<GridRowStat> },

    /// Sample answers of free-text questions.
    Text { samples: Vec<String> },

    /// No statistics, or a kind this client does not know.
    #[serde(other)]
    Empty,
}

impl AnalyticsSummary {
    /// Build a choice summary from raw counts, computing percentages.
    pub fn choice_from_counts<S: Into<String>>(counts: impl IntoIterator<Item = (S, u64)>) -> Self {
        Self::Choice {
            options: OptionStat::from_counts(counts),
        }
    }

    /// Build a scale summary from counts per point, computing the average.
    pub fn scale_from_counts(counts: impl IntoIterator<Item = (i64, u64)>) -> Self {
        let distribution: Vec<ScaleBucket> = counts
            .into_iter()
            .map(|(value, count)| ScaleBucket { value, count })
            .collect();
        let total: u64 = distribution.iter().map(|b| b.count).sum();
        let average = (total > 0).then(|| {
            let weighted: f64 = distribution
                .iter()
                .map(|b| b.value as f64 * b.count as f64)
                .sum();
            weighted / total as f64
        });
        Self::Scale {
            distribution,
            average,
        }
    }
}

/// Count and share of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionStat {
    pub text: String,
    pub count: u64,

    /// Share of all answers in percent, 0 to 100.
    pub percentage: f64,
}

impl OptionStat {
    /// Build stats from raw counts. All percentages are 0 when nothing was counted.
    pub fn from_counts<S: Into<String>>(counts: impl IntoIterator<Item = (S, u64)>) -> Vec<Self> {
        let counts: Vec<(String, u64)> = counts.into_iter().map(|(t, c)| (t.into(), c)).collect();
        let total: u64 = counts.iter().map(|(_, c)| c).sum();
        counts
            .into_iter()
            .map(|(text, count)| Self {
                text,
                count,
                percentage: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            })
            .collect()
    }
}

/// Number of answers at one scale point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleBucket {
    pub value: i64,
    pub count: u64,
}

/// Column counts for one grid row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRowStat {
    pub row: String,
    pub columns: Vec<OptionStat>,
}

/// One submitted response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: u64,

    pub submitted_at: DateTime<Utc>,

    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl ResponseRecord {
    /// The answer given to a question, if any.
    pub fn answer_to(&self, question_id: ItemId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}

/// The answer to one question within a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: ItemId,

    #[serde(default)]
    pub question_text: String,

    /// Text, number, list of selections, or row-to-column map for grids.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Answer {
    /// Flatten the value into a single line of text.
    ///
    /// Lists are joined with `"; "`, grid maps become `row: column` pairs.
    pub fn display_value(&self) -> String {
        display_json(&self.value)
    }
}

fn display_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => String::from(if *b { "Yes" } else { "No" }),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(display_json)
            .collect::<Vec<_>>()
            .join("; "),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", display_json(value)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_surveys: u64,
    pub active_surveys: u64,
    pub total_responses: u64,

    /// Share of started responses that were submitted, in percent.
    pub completion_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn has_more_pages() {
        assert!(Page::<u8>::new(vec![], 1, 10, 25).has_more());
        assert!(Page::<u8>::new(vec![], 2, 10, 25).has_more());
        assert!(!Page::<u8>::new(vec![], 3, 10, 25).has_more());
        assert!(!Page::<u8>::new(vec![], 1, 10, 0).has_more());
    }

    #[test]
    fn percentages_from_counts() {
        let stats = OptionStat::from_counts([("Yes", 3), ("No", 1)]);
        assert_eq!(stats[0].percentage, 75.0);
        assert_eq!(stats[1].percentage, 25.0);

        let empty = OptionStat::from_counts([("Yes", 0)]);
        assert_eq!(empty[0].percentage, 0.0);
    }

    #[test]
    fn scale_average() {
        let AnalyticsSummary::Scale { average, .. } =
            AnalyticsSummary::scale_from_counts([(1, 1), (5, 3)])
        else {
            panic!("Expected Scale summary");
        };
        assert_eq!(average, Some(4.0));

        let AnalyticsSummary::Scale { average, .. } = AnalyticsSummary::scale_from_counts([(1, 0)])
        else {
            panic!("Expected Scale summary");
        };
        assert_eq!(average, None);
    }

    #[test]
    fn unknown_summary_kinds_decode_as_empty() {
        let summary: AnalyticsSummary =
            serde_json::from_value(json!({ "kind": "heatmap", "cells": [] })).unwrap();
        assert_eq!(summary, AnalyticsSummary::Empty);
    }

    #[test]
    fn answers_flatten_to_text() {
        let answer = |value| Answer {
            question_id: ItemId::new(1),
            question_text: String::new(),
            value,
        };
        assert_eq!(answer(json!(["Red", "Blue"])).display_value(), "Red; Blue");
        assert_eq!(answer(json!(4)).display_value(), "4");
        assert_eq!(answer(json!(null)).display_value(), "");
        assert_eq!(
            answer(json!({ "Coffee": "Daily", "Tea": "Never" })).display_value(),
            "Coffee: Daily; Tea: Never"
        );
    }
}
