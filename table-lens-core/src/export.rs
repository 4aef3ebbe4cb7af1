use crate::analyzer::QualityReport;
use crate::stats::ColumnStats;
use crate::validate::ValidationReport;
use std::io::Write;
use std::path::Path;
use table_lens_common::format::{format_bytes, format_percentage};
use table_lens_common::{Result, TableLensError};

/// Headless one-screen summary of a quality report.
pub fn print_summary(report: &QualityReport) {
    println!("{:<16} {}", "Dataset:", report.dataset_name);
    println!("{:<16} {}", "Rows:", report.overview.total_rows);
    println!("{:<16} {}", "Columns:", report.overview.total_columns);
    println!(
        "{:<16} {}",
        "Memory:",
        format_bytes(report.overview.memory_usage_bytes)
    );
    println!(
        "{:<16} {:.1}/100",
        "Quality:",
        report.quality_metrics.quality_score * 100.0
    );
    println!(
        "{:<16} {}",
        "Missing cells:",
        format_percentage(report.quality_metrics.missing_percentage, 2)
    );
    println!(
        "{:<16} {}",
        "Duplicates:",
        format_percentage(report.quality_metrics.duplicate_percentage, 2)
    );
    if report.pii_detection.has_pii {
        println!(
            "{:<16} {}",
            "PII columns:",
            report.pii_detection.pii_columns.join(", ")
        );
    }
    println!("{:<16} {}", "Issues:", report.data_issues.len());
    for rec in &report.recommendations {
        println!("  [{}] {}: {}", rec.priority.as_str(), rec.category, rec.recommendation);
    }
}

pub fn export_json(output_path: &Path, report: &QualityReport) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|e| TableLensError::Other(e.to_string()))?;
    Ok(())
}

pub fn export_validation_json(output_path: &Path, report: &ValidationReport) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|e| TableLensError::Other(e.to_string()))?;
    Ok(())
}

/// Column stats as CSV, one row per column.
pub fn export_stats_csv(output_path: &Path, stats: &[ColumnStats]) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    writeln!(
        file,
        "column_name,inferred_type,missing_count,missing_pct,unique_count,unique_pct,mean,median,std,min,max"
    )?;
    for s in stats {
        let numeric = s.numeric.as_ref().map_or(",,,,".to_string(), |n| {
            format!("{},{},{},{},{}", n.mean, n.median, n.std, n.min, n.max)
        });
        writeln!(
            file,
            "{},{},{},{:.4},{},{:.4},{}",
            csv_escape(&s.column_name),
            s.inferred_type.as_str(),
            s.missing_count,
            s.missing_percentage,
            s.unique_count,
            s.unique_percentage,
            numeric,
        )?;
    }
    Ok(())
}

// csv-escape: wrap in quotes if the value contains comma, quote, or newline
fn csv_escape(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
