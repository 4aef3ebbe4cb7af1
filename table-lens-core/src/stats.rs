use crate::dataset::{ColumnType, Dataset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use table_lens_common::{Result, TableLensError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column_name: String,
    pub inferred_type: ColumnType,
    pub missing_count: u64,
    pub missing_percentage: f64,
    pub unique_count: u64,
    pub unique_percentage: f64,
    /// Present iff the column is numeric with at least one non-null cell.
    pub numeric: Option<NumericSummary>,
}

/// Statistics for one column. Errors if the column does not exist; callers
/// must not silently skip absent columns.
pub fn column_stats(dataset: &Dataset, column_name: &str) -> Result<ColumnStats> {
    let index = dataset
        .column_index(column_name)
        .ok_or_else(|| TableLensError::ColumnNotFound(column_name.to_owned()))?;

    let total_rows = dataset.row_count() as u64;
    let mut missing_count = 0u64;
    let mut distinct: HashSet<u64> = HashSet::new();
    for value in dataset.column_values(index) {
        if value.is_null() {
            missing_count += 1;
        } else {
            distinct.insert(value.fingerprint());
        }
    }
    let unique_count = distinct.len() as u64;

    let missing_percentage = if total_rows > 0 {
        missing_count as f64 / total_rows as f64 * 100.0
    } else {
        0.0
    };
    let unique_percentage = if total_rows > 0 {
        unique_count as f64 / total_rows as f64 * 100.0
    } else {
        0.0
    };

    let inferred_type = dataset.infer_column_type(index);
    let numeric = if inferred_type.is_numeric() {
        numeric_summary(dataset, index)
    } else {
        None
    };

    Ok(ColumnStats {
        column_name: column_name.to_owned(),
        inferred_type,
        missing_count,
        missing_percentage,
        unique_count,
        unique_percentage,
        numeric,
    })
}

/// Stats for every column, in dataset column order.
pub fn dataset_stats(dataset: &Dataset) -> Result<Vec<ColumnStats>> {
    dataset
        .columns()
        .iter()
        .map(|col| column_stats(dataset, col))
        .collect()
}

fn numeric_summary(dataset: &Dataset, index: usize) -> Option<NumericSummary> {
    let mut values: Vec<f64> = dataset
        .column_values(index)
        .filter_map(|v| v.as_f64())
        .collect();
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mut sum = 0.0;
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &v in &values {
        sum += v;
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    let mean = sum / n;
    // sample standard deviation (n-1), 0 for a single value
    let std = if values.len() > 1 {
        let sum_sq_dev: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum_sq_dev / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    // exact median: sort, midpoint average for even counts
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    Some(NumericSummary {
        mean,
        median,
        std,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn ds(cells: Vec<Vec<Value>>) -> Dataset {
        let cols = (0..cells[0].len()).map(|i| format!("c{i}")).collect();
        Dataset::new(cols, cells).unwrap()
    }

    #[test]
    fn missing_and_unique_counts() {
        let d = ds(vec![
            vec![Value::Str("a".into())],
            vec![Value::Str("a".into())],
            vec![Value::Str("b".into())],
            vec![Value::Null],
        ]);
        let s = column_stats(&d, "c0").unwrap();
        assert_eq!(s.missing_count, 1);
        assert_eq!(s.missing_percentage, 25.0);
        assert_eq!(s.unique_count, 2); // nulls excluded from distinctness
        assert_eq!(s.unique_percentage, 50.0);
        assert!(s.numeric.is_none());
    }

    #[test]
    fn numeric_summary_exact() {
        let d = ds(vec![
            vec![Value::Int(1)],
            vec![Value::Int(2)],
            vec![Value::Int(3)],
            vec![Value::Int(4)],
            vec![Value::Null],
        ]);
        let s = column_stats(&d, "c0").unwrap();
        let num = s.numeric.unwrap();
        assert_eq!(num.mean, 2.5);
        assert_eq!(num.median, 2.5); // even count midpoint
        assert_eq!(num.min, 1.0);
        assert_eq!(num.max, 4.0);
        // sample std of 1,2,3,4
        assert!((num.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn odd_count_median() {
        let d = ds(vec![
            vec![Value::Float(3.0)],
            vec![Value::Float(1.0)],
            vec![Value::Float(2.0)],
        ]);
        let num = column_stats(&d, "c0").unwrap().numeric.unwrap();
        assert_eq!(num.median, 2.0);
    }

    #[test]
    fn all_null_numeric_fields_absent() {
        let d = ds(vec![vec![Value::Null], vec![Value::Null]]);
        let s = column_stats(&d, "c0").unwrap();
        assert_eq!(s.inferred_type, ColumnType::Unknown);
        assert_eq!(s.missing_percentage, 100.0);
        assert_eq!(s.unique_count, 0);
        assert!(s.numeric.is_none());
    }

    #[test]
    fn zero_rows_percentages_are_zero() {
        let d = Dataset::new(vec!["c0".into()], vec![]).unwrap();
        let s = column_stats(&d, "c0").unwrap();
        assert_eq!(s.missing_percentage, 0.0);
        assert_eq!(s.unique_percentage, 0.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let d = ds(vec![vec![Value::Int(1)]]);
        let err = column_stats(&d, "nope").unwrap_err();
        assert!(matches!(err, TableLensError::ColumnNotFound(c) if c == "nope"));
    }

    #[test]
    fn single_value_std_is_zero() {
        let d = ds(vec![vec![Value::Int(7)]]);
        let num = column_stats(&d, "c0").unwrap().numeric.unwrap();
        assert_eq!(num.std, 0.0);
        assert_eq!(num.median, 7.0);
    }
}
