use crate::dataset::Dataset;
use crate::quality::QualityMetrics;
use crate::stats::ColumnStats;
use serde::{Deserialize, Serialize};
use table_lens_common::config::IssueThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    // aliases accept the capitalized spellings rule authors tend to write
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Critical")]
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    HighMissingData,
    DuplicateRows,
    LowCardinalityId,
}

/// A typed quality finding. `column` is a column name, or "all" for
/// dataset-wide findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub column: String,
    pub description: String,
    pub affected_rows: u64,
}

/// Run the three issue detectors independently. Output order: high-missing
/// issues in column order, then the dataset-wide duplicate issue, then
/// low-cardinality id issues in column order.
pub fn detect_issues(
    dataset: &Dataset,
    stats: &[ColumnStats],
    metrics: &QualityMetrics,
    thresholds: &IssueThresholds,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for s in stats {
        if s.missing_percentage > thresholds.missing_issue_pct {
            let severity = if s.missing_percentage > thresholds.missing_high_pct {
                Severity::High
            } else {
                Severity::Medium
            };
            issues.push(Issue {
                kind: IssueKind::HighMissingData,
                severity,
                column: s.column_name.clone(),
                description: format!(
                    "{} has {:.1}% missing values",
                    s.column_name, s.missing_percentage
                ),
                affected_rows: s.missing_count,
            });
        }
    }

    if metrics.duplicate_rows > 0 {
        let severity = if metrics.duplicate_percentage > thresholds.duplicate_high_pct {
            Severity::High
        } else if metrics.duplicate_percentage > thresholds.duplicate_medium_pct {
            Severity::Medium
        } else {
            Severity::Low
        };
        issues.push(Issue {
            kind: IssueKind::DuplicateRows,
            severity,
            column: "all".into(),
            description: format!(
                "Found {} duplicate rows ({:.1}%)",
                metrics.duplicate_rows, metrics.duplicate_percentage
            ),
            affected_rows: metrics.duplicate_rows,
        });
    }

    let total_rows = dataset.row_count() as u64;
    for s in stats {
        if s.column_name.to_lowercase().contains("id")
            && (s.unique_count as f64) < total_rows as f64 * thresholds.id_uniqueness_ratio
        {
            issues.push(Issue {
                kind: IssueKind::LowCardinalityId,
                severity: Severity::Medium,
                column: s.column_name.clone(),
                description: format!(
                    "{} appears to be an ID but has low uniqueness",
                    s.column_name
                ),
                affected_rows: total_rows - s.unique_count,
            });
        }
    }

    issues
}
