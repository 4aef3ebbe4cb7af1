use crate::dataset::Dataset;
use crate::issues::Severity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use tracing::debug;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Required,
    Format,
    Range,
    Custom,
}

/// A declarative per-field check, supplied by the caller (manually authored
/// or from a rule-suggestion collaborator). The engine applies rules as
/// given and never validates authorship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRule {
    pub field: String,
    pub rule_type: RuleType,
    pub rule: String,
    pub error_message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule_type: RuleType,
    pub message: String,
    pub severity: Severity,
    pub affected_rows: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldResult {
    pub total_checks: u64,
    pub passed: u64,
    pub failed: u64,
    pub issues: Vec<RuleViolation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingFieldError {
    pub field: String,
    pub error: String,
    pub severity: Severity,
}

/// Per-run validation outcome. field_results is a BTreeMap so repeat runs
/// serialize byte-identically; rule evaluation still follows input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: u64,
    pub total_checks: u64,
    pub passed_checks: u64,
    pub failed_checks: u64,
    pub pass_rate: f64,
    pub errors: Vec<MissingFieldError>,
    pub field_results: BTreeMap<String, FieldResult>,
}

/// Extension point for `custom` rules: checks registered by the rule's
/// description string. An unregistered custom rule passes with no applied
/// checks.
pub type CustomCheck = Box<dyn Fn(&Dataset, &str) -> Option<RuleViolation>>;

#[derive(Default)]
pub struct CustomCheckRegistry {
    checks: HashMap<String, CustomCheck>,
}

impl CustomCheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: impl Into<String>, check: CustomCheck) {
        self.checks.insert(rule.into(), check);
    }

    fn get(&self, rule: &str) -> Option<&CustomCheck> {
        self.checks.get(rule)
    }
}

/// Run a rule list against a dataset with no custom checks registered.
pub fn run_validation(rules: &[ValidationRule], dataset: &Dataset) -> ValidationReport {
    run_validation_with(rules, dataset, &CustomCheckRegistry::new())
}

pub fn run_validation_with(
    rules: &[ValidationRule],
    dataset: &Dataset,
    registry: &CustomCheckRegistry,
) -> ValidationReport {
    // fixed pattern, compiled once per run and shared across format rules
    let email_re = Regex::new(EMAIL_PATTERN).expect("email pattern compiles");

    let mut report = ValidationReport {
        total_rows: dataset.row_count() as u64,
        total_checks: 0,
        passed_checks: 0,
        failed_checks: 0,
        pass_rate: 0.0,
        errors: Vec::new(),
        field_results: BTreeMap::new(),
    };

    for rule in rules {
        report.total_checks += 1;

        let Some(index) = dataset.column_index(&rule.field) else {
            report.errors.push(MissingFieldError {
                field: rule.field.clone(),
                error: format!("Field '{}' not found in data", rule.field),
                severity: Severity::Critical,
            });
            report.failed_checks += 1;
            continue;
        };

        let field_result = report.field_results.entry(rule.field.clone()).or_default();
        field_result.total_checks += 1;

        let mut violations = Vec::new();
        match rule.rule_type {
            RuleType::Required => {
                let null_count = dataset.column_values(index).filter(|v| v.is_null()).count() as u64;
                if null_count > 0 {
                    violations.push(RuleViolation {
                        rule_type: RuleType::Required,
                        message: format!("Found {null_count} null values"),
                        severity: rule.severity,
                        affected_rows: null_count,
                    });
                }
            }
            RuleType::Format => {
                // email shape is the only built-in format; nulls are skipped
                // here, the required rule owns null detection
                if rule.field.to_lowercase().contains("email") {
                    let invalid = dataset
                        .column_values(index)
                        .filter(|v| !v.is_null())
                        .filter(|v| !email_re.is_match(&v.to_display_string()))
                        .count() as u64;
                    if invalid > 0 {
                        violations.push(RuleViolation {
                            rule_type: RuleType::Format,
                            message: format!("Found {invalid} invalid email formats"),
                            severity: rule.severity,
                            affected_rows: invalid,
                        });
                    }
                }
            }
            RuleType::Range => {
                if dataset.infer_column_type(index).is_numeric() {
                    let lower = rule.field.to_lowercase();
                    if lower.contains("age") || lower.contains("amount") {
                        let negative = dataset
                            .column_values(index)
                            .filter_map(|v| v.as_f64())
                            .filter(|n| *n < 0.0)
                            .count() as u64;
                        if negative > 0 {
                            violations.push(RuleViolation {
                                rule_type: RuleType::Range,
                                message: format!("Found {negative} negative values"),
                                severity: rule.severity,
                                affected_rows: negative,
                            });
                        }
                    }
                    if lower.contains("age") {
                        let unrealistic = dataset
                            .column_values(index)
                            .filter_map(|v| v.as_f64())
                            .filter(|n| *n < 0.0 || *n > 120.0)
                            .count() as u64;
                        if unrealistic > 0 {
                            violations.push(RuleViolation {
                                rule_type: RuleType::Range,
                                message: format!("Found {unrealistic} unrealistic age values"),
                                severity: rule.severity,
                                affected_rows: unrealistic,
                            });
                        }
                    }
                }
            }
            RuleType::Custom => {
                if let Some(check) = registry.get(&rule.rule) {
                    if let Some(violation) = check(dataset, &rule.field) {
                        violations.push(violation);
                    }
                }
            }
        }

        let passed = violations.is_empty();
        field_result.issues.extend(violations);
        if passed {
            report.passed_checks += 1;
            field_result.passed += 1;
        } else {
            report.failed_checks += 1;
            field_result.failed += 1;
        }
    }

    report.pass_rate = if report.total_checks > 0 {
        report.passed_checks as f64 / report.total_checks as f64
    } else {
        0.0
    };
    debug!(
        total = report.total_checks,
        passed = report.passed_checks,
        failed = report.failed_checks,
        "validation run complete"
    );
    report
}
