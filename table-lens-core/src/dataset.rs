use serde::{Deserialize, Serialize};
use table_lens_common::{Result, TableLensError};
use xxhash_rust::xxh3::xxh3_64;

/// One cell of a dataset. `Date` carries ISO-8601 text; the engine tags it
/// but never parses it further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view: Int and Float only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Display form used when a non-string cell hits a string check.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Str(s) | Value::Date(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }

    /// Canonical byte encoding: type tag, then a length-delimited payload
    /// for text and little-endian bytes for scalars. Floats encode by bit
    /// pattern, so NaN cells compare equal and 0.0 differs from -0.0.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Value::Null => buf.push(0xFF),
            Value::Str(s) => {
                buf.push(0x01);
                buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
            Value::Int(i) => {
                buf.push(0x02);
                buf.extend_from_slice(&i.to_le_bytes());
            }
            Value::Float(f) => {
                buf.push(0x03);
                buf.extend_from_slice(&f.to_bits().to_le_bytes());
            }
            Value::Bool(b) => {
                buf.push(0x04);
                buf.push(*b as u8);
            }
            Value::Date(s) => {
                buf.push(0x05);
                buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
        }
    }

    /// xxh3 fingerprint of a single cell, used for distinct-value counting.
    pub fn fingerprint(&self) -> u64 {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        xxh3_64(&buf)
    }

    /// Rough in-memory footprint estimate for the overview.
    pub fn memory_estimate(&self) -> u64 {
        match self {
            Value::Null => 8,
            Value::Str(s) | Value::Date(s) => s.len() as u64 + 24,
            Value::Int(_) | Value::Float(_) => 8,
            Value::Bool(_) => 1,
        }
    }
}

/// Inferred primitive type of a column. `Unknown` means every cell is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Date,
    Str,
    Unknown,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }

    /// Same spelling the serde rename produces, for text exports.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
            ColumnType::Str => "str",
            ColumnType::Unknown => "unknown",
        }
    }
}

/// An in-memory rectangular table: ordered column names plus row-major
/// cells. The engine never mutates one; every analysis recomputes from
/// scratch, so concurrent reads of independent copies are safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset, rejecting ragged rows up front.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let expected = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(TableLensError::RaggedRow {
                    row: i,
                    got: row.len(),
                    expected,
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Ingest a JSON array of objects. Columns are the union of keys in
    /// first-seen order (each record's keys iterate sorted, serde_json's
    /// map order); keys absent from a record become Null. Numbers ingest
    /// as Int when they fit i64, Float otherwise.
    pub fn from_json_records(json: &str) -> Result<Self> {
        let records: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(json).map_err(|e| TableLensError::Ingest(e.to_string()))?;

        let mut columns: Vec<String> = Vec::new();
        for rec in &records {
            for key in rec.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for rec in &records {
            let row = columns
                .iter()
                .map(|col| match rec.get(col) {
                    None | Some(serde_json::Value::Null) => Ok(Value::Null),
                    Some(serde_json::Value::Bool(b)) => Ok(Value::Bool(*b)),
                    Some(serde_json::Value::Number(n)) => {
                        if let Some(i) = n.as_i64() {
                            Ok(Value::Int(i))
                        } else if let Some(f) = n.as_f64() {
                            Ok(Value::Float(f))
                        } else {
                            Err(TableLensError::Ingest(format!(
                                "number {n} in column '{col}' does not fit i64 or f64"
                            )))
                        }
                    }
                    Some(serde_json::Value::String(s)) => Ok(Value::Str(s.clone())),
                    Some(other) => Err(TableLensError::Ingest(format!(
                        "nested value in column '{col}': {other}"
                    ))),
                })
                .collect::<Result<Vec<Value>>>()?;
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate one column's cells in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Infer the primitive type of a column from its non-null cells.
    /// Int widens to Float when the two are mixed; any other mix is Str.
    pub fn infer_column_type(&self, index: usize) -> ColumnType {
        let mut inferred: Option<ColumnType> = None;
        for value in self.column_values(index) {
            let tag = match value {
                Value::Null => continue,
                Value::Int(_) => ColumnType::Int,
                Value::Float(_) => ColumnType::Float,
                Value::Bool(_) => ColumnType::Bool,
                Value::Date(_) => ColumnType::Date,
                Value::Str(_) => ColumnType::Str,
            };
            inferred = Some(match inferred {
                None => tag,
                Some(prev) if prev == tag => prev,
                Some(ColumnType::Int) if tag == ColumnType::Float => ColumnType::Float,
                Some(ColumnType::Float) if tag == ColumnType::Int => ColumnType::Float,
                Some(_) => return ColumnType::Str,
            });
        }
        inferred.unwrap_or(ColumnType::Unknown)
    }

    /// xxh3 fingerprint of an entire row, for exact duplicate detection.
    pub fn row_fingerprint(&self, row: usize) -> u64 {
        let mut buf = Vec::new();
        for value in &self.rows[row] {
            value.encode_into(&mut buf);
        }
        xxh3_64(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_row_rejected() {
        let err = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Int(1)]],
        )
        .unwrap_err();
        assert!(matches!(err, TableLensError::RaggedRow { row: 0, got: 1, expected: 2 }));
    }

    #[test]
    fn json_records_union_columns() {
        let ds = Dataset::from_json_records(
            r#"[{"a": 1, "b": "x"}, {"b": "y", "c": true}]"#,
        )
        .unwrap();
        assert_eq!(ds.columns(), ["a", "b", "c"]);
        assert_eq!(ds.rows()[0][2], Value::Null); // c absent from first record
        assert_eq!(ds.rows()[1][0], Value::Null); // a absent from second
        assert_eq!(ds.rows()[1][2], Value::Bool(true));
    }

    #[test]
    fn json_numbers_int_vs_float() {
        let ds = Dataset::from_json_records(r#"[{"n": 3}, {"n": 3.5}]"#).unwrap();
        assert_eq!(ds.rows()[0][0], Value::Int(3));
        assert_eq!(ds.rows()[1][0], Value::Float(3.5));
    }

    #[test]
    fn infer_int_widens_to_float() {
        let ds = Dataset::new(
            vec!["n".into()],
            vec![vec![Value::Int(1)], vec![Value::Float(2.5)], vec![Value::Null]],
        )
        .unwrap();
        assert_eq!(ds.infer_column_type(0), ColumnType::Float);
    }

    #[test]
    fn infer_all_null_is_unknown() {
        let ds = Dataset::new(vec!["n".into()], vec![vec![Value::Null]]).unwrap();
        assert_eq!(ds.infer_column_type(0), ColumnType::Unknown);
    }

    #[test]
    fn infer_mixed_falls_back_to_str() {
        let ds = Dataset::new(
            vec!["n".into()],
            vec![vec![Value::Int(1)], vec![Value::Str("x".into())]],
        )
        .unwrap();
        assert_eq!(ds.infer_column_type(0), ColumnType::Str);
    }

    #[test]
    fn row_fingerprint_equal_rows_match() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![Value::Int(1), Value::Str("x".into())],
                vec![Value::Int(1), Value::Str("x".into())],
                vec![Value::Int(1), Value::Str("y".into())],
            ],
        )
        .unwrap();
        assert_eq!(ds.row_fingerprint(0), ds.row_fingerprint(1));
        assert_ne!(ds.row_fingerprint(0), ds.row_fingerprint(2));
    }

    #[test]
    fn column_type_as_str_matches_serde_spelling() {
        for t in [
            ColumnType::Int,
            ColumnType::Float,
            ColumnType::Bool,
            ColumnType::Date,
            ColumnType::Str,
            ColumnType::Unknown,
        ] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn str_and_date_fingerprints_differ() {
        let s = Value::Str("2024-01-01".into());
        let d = Value::Date("2024-01-01".into());
        assert_ne!(s.fingerprint(), d.fingerprint());
    }
}
