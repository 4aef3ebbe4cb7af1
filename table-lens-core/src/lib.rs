pub mod analyzer;
pub mod dataset;
pub mod export;
pub mod issues;
pub mod pii;
pub mod profile;
pub mod quality;
pub mod stats;
pub mod validate;

pub use table_lens_common::{AnalysisPolicy, Result, TableLensError};

pub use analyzer::{analyze, Overview, QualityReport, Recommendation};
pub use dataset::{ColumnType, Dataset, Value};
pub use export::{export_json, export_stats_csv, export_validation_json, print_summary};
pub use issues::{detect_issues, Issue, IssueKind, Severity};
pub use pii::{detect_pii, is_pii_column, PiiReport, PII_KEYWORDS};
pub use profile::{create_profile, validate_dataset_shape, DataProfile, ShapeValidation};
pub use quality::{count_duplicate_rows, quality_metrics, QualityMetrics};
pub use stats::{column_stats, dataset_stats, ColumnStats, NumericSummary};
pub use validate::{
    run_validation, run_validation_with, CustomCheckRegistry, FieldResult, RuleType,
    RuleViolation, ValidationReport, ValidationRule,
};
