use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// Column-name vocabulary for PII flagging. Substring match, so
/// "username" matches "name" and "average" matches "age"; for a
/// compliance screen false positives beat false negatives.
pub const PII_KEYWORDS: &[&str] = &[
    "email", "phone", "ssn", "social", "passport", "license", "credit", "card", "account",
    "password", "secret", "token", "name", "address", "zip", "postal", "birth", "dob", "age",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiReport {
    pub has_pii: bool,
    pub pii_columns: Vec<String>,
    pub pii_count: usize,
}

pub fn is_pii_column(column_name: &str) -> bool {
    let lower = column_name.to_lowercase();
    PII_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Name-based PII detection; no cell content is inspected. Flagged
/// columns come back in dataset column order.
pub fn detect_pii(dataset: &Dataset) -> PiiReport {
    let pii_columns: Vec<String> = dataset
        .columns()
        .iter()
        .filter(|col| is_pii_column(col))
        .cloned()
        .collect();
    PiiReport {
        has_pii: !pii_columns.is_empty(),
        pii_count: pii_columns.len(),
        pii_columns,
    }
}
