use crate::dataset::Dataset;
use crate::pii::detect_pii;
use crate::quality::{quality_metrics, QualityMetrics};
use crate::stats::{dataset_stats, ColumnStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use table_lens_common::{AnalysisPolicy, Result, TableLensError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub rows: u64,
    pub columns: u64,
}

/// Compact dataset profile for hand-off to mapping/planning collaborators:
/// shape, quality metrics, per-column stats, PII flags, memory estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataProfile {
    pub dataset_name: String,
    pub shape: Shape,
    pub quality_metrics: QualityMetrics,
    pub columns: BTreeMap<String, ColumnStats>,
    pub pii_columns: Vec<String>,
    pub memory_usage_bytes: u64,
}

pub fn create_profile(
    dataset: &Dataset,
    dataset_name: &str,
    policy: &AnalysisPolicy,
) -> Result<DataProfile> {
    if dataset.column_count() == 0 {
        return Err(TableLensError::EmptyDataset);
    }
    let stats = dataset_stats(dataset)?;
    let columns: BTreeMap<String, ColumnStats> = stats
        .into_iter()
        .map(|s| (s.column_name.clone(), s))
        .collect();
    let memory_usage_bytes = dataset
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .map(|v| v.memory_estimate())
        .sum();
    Ok(DataProfile {
        dataset_name: dataset_name.to_owned(),
        shape: Shape {
            rows: dataset.row_count() as u64,
            columns: dataset.column_count() as u64,
        },
        quality_metrics: quality_metrics(dataset, &policy.weights),
        columns,
        pii_columns: detect_pii(dataset).pii_columns,
        memory_usage_bytes,
    })
}

/// Pre-flight structural check before any analysis or migration step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate_dataset_shape(
    dataset: &Dataset,
    required_columns: &[&str],
    policy: &AnalysisPolicy,
) -> ShapeValidation {
    let mut result = ShapeValidation {
        is_valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    if dataset.row_count() == 0 || dataset.column_count() == 0 {
        result.is_valid = false;
        result.errors.push("Dataset is empty".into());
        return result;
    }

    let missing: Vec<&str> = required_columns
        .iter()
        .filter(|col| !dataset.has_column(col))
        .copied()
        .collect();
    if !missing.is_empty() {
        result.is_valid = false;
        result
            .errors
            .push(format!("Missing required columns: {}", missing.join(", ")));
    }

    let metrics = quality_metrics(dataset, &policy.weights);
    if metrics.missing_percentage > 50.0 {
        result.warnings.push(format!(
            "High missing data percentage: {:.1}%",
            metrics.missing_percentage
        ));
    }
    if metrics.duplicate_percentage > 20.0 {
        result.warnings.push(format!(
            "High duplicate percentage: {:.1}%",
            metrics.duplicate_percentage
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn policy() -> AnalysisPolicy {
        AnalysisPolicy::default()
    }

    fn small() -> Dataset {
        Dataset::new(
            vec!["id".into(), "email".into()],
            vec![
                vec![Value::Int(1), Value::Str("a@b.com".into())],
                vec![Value::Int(2), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn profile_collects_all_sections() {
        let p = create_profile(&small(), "crm", &policy()).unwrap();
        assert_eq!(p.shape.rows, 2);
        assert_eq!(p.shape.columns, 2);
        assert_eq!(p.columns.len(), 2);
        assert_eq!(p.pii_columns, ["email"]);
        assert_eq!(p.quality_metrics.missing_cells, 1);
        assert!(p.memory_usage_bytes > 0);
    }

    #[test]
    fn empty_dataset_rejected() {
        let d = Dataset::new(vec![], vec![]).unwrap();
        assert!(create_profile(&d, "x", &policy()).is_err());
    }

    #[test]
    fn shape_rejects_empty() {
        let d = Dataset::new(vec!["a".into()], vec![]).unwrap();
        let v = validate_dataset_shape(&d, &[], &policy());
        assert!(!v.is_valid);
        assert_eq!(v.errors, ["Dataset is empty"]);
    }

    #[test]
    fn shape_reports_missing_required_columns() {
        let v = validate_dataset_shape(&small(), &["id", "name"], &policy());
        assert!(!v.is_valid);
        assert_eq!(v.errors, ["Missing required columns: name"]);
    }

    #[test]
    fn shape_warns_on_heavy_missing_data() {
        let d = Dataset::new(
            vec!["a".into()],
            vec![vec![Value::Null], vec![Value::Null], vec![Value::Int(1)]],
        )
        .unwrap();
        let v = validate_dataset_shape(&d, &[], &policy());
        assert!(v.is_valid);
        assert_eq!(v.warnings, ["High missing data percentage: 66.7%"]);
    }
}
