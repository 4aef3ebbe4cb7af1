use crate::dataset::{ColumnType, Dataset};
use crate::issues::{detect_issues, Issue, Severity};
use crate::pii::{detect_pii, PiiReport};
use crate::quality::{quality_metrics, QualityMetrics};
use crate::stats::{dataset_stats, ColumnStats};
use serde::{Deserialize, Serialize};
use table_lens_common::{AnalysisPolicy, Result, TableLensError};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_rows: u64,
    pub total_columns: u64,
    /// Estimated in-memory footprint; a heuristic, not an allocator count.
    pub memory_usage_bytes: u64,
    pub numeric_columns: u64,
    pub categorical_columns: u64,
    pub datetime_columns: u64,
    pub boolean_columns: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Severity,
    pub recommendation: String,
    pub action: String,
}

/// The aggregate quality report. Built whole per call; the engine keeps
/// no reference after returning it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset_name: String,
    pub overview: Overview,
    pub column_analysis: Vec<ColumnStats>,
    pub quality_metrics: QualityMetrics,
    pub pii_detection: PiiReport,
    pub data_issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
}

fn overview(dataset: &Dataset) -> Overview {
    let mut numeric = 0u64;
    let mut categorical = 0u64;
    let mut datetime = 0u64;
    let mut boolean = 0u64;
    for index in 0..dataset.column_count() {
        match dataset.infer_column_type(index) {
            ColumnType::Int | ColumnType::Float => numeric += 1,
            ColumnType::Date => datetime += 1,
            ColumnType::Bool => boolean += 1,
            ColumnType::Str | ColumnType::Unknown => categorical += 1,
        }
    }
    let memory_usage_bytes: u64 = dataset
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .map(|v| v.memory_estimate())
        .sum();
    Overview {
        total_rows: dataset.row_count() as u64,
        total_columns: dataset.column_count() as u64,
        memory_usage_bytes,
        numeric_columns: numeric,
        categorical_columns: categorical,
        datetime_columns: datetime,
        boolean_columns: boolean,
    }
}

fn recommendations(
    metrics: &QualityMetrics,
    pii: &PiiReport,
    policy: &AnalysisPolicy,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let t = &policy.recommendations;

    if metrics.missing_percentage > t.missing_pct {
        recs.push(Recommendation {
            category: "Data Completeness".into(),
            priority: Severity::High,
            recommendation: "Address missing data before migration".into(),
            action: "Review columns with high missing percentages and decide on imputation strategy or removal".into(),
        });
    }
    if metrics.duplicate_percentage > t.duplicate_pct {
        recs.push(Recommendation {
            category: "Data Uniqueness".into(),
            priority: Severity::High,
            recommendation: "Remove or merge duplicate records".into(),
            action: "Investigate duplicate rows and establish deduplication rules".into(),
        });
    }
    if pii.has_pii {
        recs.push(Recommendation {
            category: "Data Privacy".into(),
            priority: Severity::Critical,
            recommendation: "Implement PII protection measures".into(),
            action: format!(
                "Apply encryption/masking to PII fields: {}",
                pii.pii_columns.join(", ")
            ),
        });
    }
    if metrics.quality_score < t.min_quality_score {
        recs.push(Recommendation {
            category: "Overall Quality".into(),
            priority: Severity::High,
            recommendation: "Improve overall data quality before migration".into(),
            action: "Address identified issues to reach minimum quality threshold of 70%".into(),
        });
    }
    recs
}

/// Full quality analysis: overview, per-column stats, dataset metrics, PII
/// flags, issues, recommendations. Pure computation; fails fast on a
/// zero-column dataset before any report state is built.
pub fn analyze(dataset: &Dataset, dataset_name: &str, policy: &AnalysisPolicy) -> Result<QualityReport> {
    if dataset.column_count() == 0 {
        return Err(TableLensError::EmptyDataset);
    }
    debug!(
        dataset = dataset_name,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "starting quality analysis"
    );

    let column_analysis = dataset_stats(dataset)?;
    let metrics = quality_metrics(dataset, &policy.weights);
    let pii = detect_pii(dataset);
    let issues = detect_issues(dataset, &column_analysis, &metrics, &policy.issues);
    let recommendations = recommendations(&metrics, &pii, policy);

    debug!(
        quality_score = metrics.quality_score,
        issues = issues.len(),
        recommendations = recommendations.len(),
        "analysis complete"
    );

    Ok(QualityReport {
        dataset_name: dataset_name.to_owned(),
        overview: overview(dataset),
        column_analysis,
        quality_metrics: metrics,
        pii_detection: pii,
        data_issues: issues,
        recommendations,
    })
}
