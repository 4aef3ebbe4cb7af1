use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use table_lens_common::config::ScoreWeights;

/// Dataset-level quality aggregate. quality_score is the weighted composite
/// of completeness and uniqueness; the default 0.6/0.4 split is report
/// policy and downstream readiness cutoffs (70%) depend on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub total_rows: u64,
    pub total_columns: u64,
    pub total_cells: u64,
    pub missing_cells: u64,
    pub duplicate_rows: u64,
    pub missing_percentage: f64,
    pub duplicate_percentage: f64,
    pub completeness_score: f64,
    pub uniqueness_score: f64,
    pub quality_score: f64,
}

/// Count rows that are exact value-for-value copies of an earlier row.
/// Exact mode only: xxh3 row fingerprints in a HashSet, no estimation
/// structures, so repeat runs are byte-identical.
pub fn count_duplicate_rows(dataset: &Dataset) -> u64 {
    let mut seen: HashSet<u64> = HashSet::with_capacity(dataset.row_count());
    let mut dups = 0u64;
    for row in 0..dataset.row_count() {
        if !seen.insert(dataset.row_fingerprint(row)) {
            dups += 1;
        }
    }
    dups
}

pub fn quality_metrics(dataset: &Dataset, weights: &ScoreWeights) -> QualityMetrics {
    let total_rows = dataset.row_count() as u64;
    let total_columns = dataset.column_count() as u64;
    let total_cells = total_rows * total_columns;

    let missing_cells: u64 = dataset
        .rows()
        .iter()
        .map(|row| row.iter().filter(|v| v.is_null()).count() as u64)
        .sum();
    let missing_percentage = if total_cells > 0 {
        missing_cells as f64 / total_cells as f64 * 100.0
    } else {
        0.0
    };

    let duplicate_rows = count_duplicate_rows(dataset);
    let duplicate_percentage = if total_rows > 0 {
        duplicate_rows as f64 / total_rows as f64 * 100.0
    } else {
        0.0
    };

    // empty-but-valid datasets score 1.0: nothing missing, nothing duplicated
    let completeness_score = 1.0 - missing_percentage / 100.0;
    let uniqueness_score = 1.0 - duplicate_percentage / 100.0;
    let quality_score =
        completeness_score * weights.completeness + uniqueness_score * weights.uniqueness;

    QualityMetrics {
        total_rows,
        total_columns,
        total_cells,
        missing_cells,
        duplicate_rows,
        missing_percentage,
        duplicate_percentage,
        completeness_score,
        uniqueness_score,
        quality_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn weights() -> ScoreWeights {
        ScoreWeights::default()
    }

    fn row(i: i64, s: &str) -> Vec<Value> {
        vec![Value::Int(i), Value::Str(s.into())]
    }

    #[test]
    fn clean_dataset_scores_one() {
        let d = Dataset::new(
            vec!["id".into(), "v".into()],
            vec![row(1, "a"), row(2, "b")],
        )
        .unwrap();
        let m = quality_metrics(&d, &weights());
        assert_eq!(m.total_cells, 4);
        assert_eq!(m.missing_cells, 0);
        assert_eq!(m.duplicate_rows, 0);
        assert_eq!(m.quality_score, 1.0);
    }

    #[test]
    fn duplicate_counts_once_per_recurrence() {
        // rows 3 and 7 (0-based 2 and 6) identical: one duplicate
        let mut rows: Vec<Vec<Value>> = (0..10).map(|i| row(i, "x")).collect();
        rows[6] = rows[2].clone();
        let d = Dataset::new(vec!["id".into(), "v".into()], rows).unwrap();
        let m = quality_metrics(&d, &weights());
        assert_eq!(m.duplicate_rows, 1);
        assert_eq!(m.duplicate_percentage, 10.0);
    }

    #[test]
    fn triple_copy_counts_two_duplicates() {
        let rows = vec![row(1, "a"), row(1, "a"), row(1, "a")];
        let d = Dataset::new(vec!["id".into(), "v".into()], rows).unwrap();
        assert_eq!(count_duplicate_rows(&d), 2);
    }

    #[test]
    fn missing_percentage_over_cells() {
        let d = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![Value::Int(1), Value::Null],
                vec![Value::Int(2), Value::Null],
            ],
        )
        .unwrap();
        let m = quality_metrics(&d, &weights());
        assert_eq!(m.missing_cells, 2);
        assert_eq!(m.missing_percentage, 50.0);
        assert!((m.completeness_score - 0.5).abs() < 1e-12);
        assert!((m.quality_score - (0.5 * 0.6 + 1.0 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn zero_rows_is_empty_but_valid() {
        let d = Dataset::new(vec!["a".into()], vec![]).unwrap();
        let m = quality_metrics(&d, &weights());
        assert_eq!(m.total_cells, 0);
        assert_eq!(m.missing_percentage, 0.0);
        assert_eq!(m.duplicate_percentage, 0.0);
        assert_eq!(m.quality_score, 1.0);
    }

    #[test]
    fn score_one_iff_clean() {
        let d = Dataset::new(
            vec!["a".into()],
            vec![vec![Value::Int(1)], vec![Value::Int(1)]],
        )
        .unwrap();
        let m = quality_metrics(&d, &weights());
        assert_eq!(m.duplicate_rows, 1);
        assert!(m.quality_score < 1.0);
    }
}
