use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Thresholds below are migration-report policy: downstream "ready vs needs
// work" cutoffs assume these exact defaults, so changing them changes the
// meaning of every archived report.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueThresholds {
    /// Column missing% above which a high_missing_data issue fires.
    #[serde(default = "default_missing_issue_pct")]
    pub missing_issue_pct: f64,
    /// Column missing% above which that issue escalates to high severity.
    #[serde(default = "default_missing_high_pct")]
    pub missing_high_pct: f64,
    /// Duplicate% above which the duplicate_rows issue is medium severity.
    #[serde(default = "default_duplicate_medium_pct")]
    pub duplicate_medium_pct: f64,
    /// Duplicate% above which the duplicate_rows issue is high severity.
    #[serde(default = "default_duplicate_high_pct")]
    pub duplicate_high_pct: f64,
    /// An "id"-named column with unique_count below this fraction of rows
    /// is flagged low_cardinality_id.
    #[serde(default = "default_id_uniqueness_ratio")]
    pub id_uniqueness_ratio: f64,
}

fn default_missing_issue_pct() -> f64 {
    20.0
}
fn default_missing_high_pct() -> f64 {
    50.0
}
fn default_duplicate_medium_pct() -> f64 {
    5.0
}
fn default_duplicate_high_pct() -> f64 {
    10.0
}
fn default_id_uniqueness_ratio() -> f64 {
    0.9
}

impl Default for IssueThresholds {
    fn default() -> Self {
        Self {
            missing_issue_pct: default_missing_issue_pct(),
            missing_high_pct: default_missing_high_pct(),
            duplicate_medium_pct: default_duplicate_medium_pct(),
            duplicate_high_pct: default_duplicate_high_pct(),
            id_uniqueness_ratio: default_id_uniqueness_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    /// Dataset missing% above which a Data Completeness recommendation fires.
    #[serde(default = "default_rec_missing_pct")]
    pub missing_pct: f64,
    /// Dataset duplicate% above which a Data Uniqueness recommendation fires.
    #[serde(default = "default_rec_duplicate_pct")]
    pub duplicate_pct: f64,
    /// Quality score below which an Overall Quality recommendation fires.
    #[serde(default = "default_rec_min_quality")]
    pub min_quality_score: f64,
}

fn default_rec_missing_pct() -> f64 {
    10.0
}
fn default_rec_duplicate_pct() -> f64 {
    5.0
}
fn default_rec_min_quality() -> f64 {
    0.7
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            missing_pct: default_rec_missing_pct(),
            duplicate_pct: default_rec_duplicate_pct(),
            min_quality_score: default_rec_min_quality(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_completeness_weight")]
    pub completeness: f64,
    #[serde(default = "default_uniqueness_weight")]
    pub uniqueness: f64,
}

fn default_completeness_weight() -> f64 {
    0.6
}
fn default_uniqueness_weight() -> f64 {
    0.4
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            completeness: default_completeness_weight(),
            uniqueness: default_uniqueness_weight(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisPolicy {
    #[serde(default)]
    pub issues: IssueThresholds,
    #[serde(default)]
    pub recommendations: RecommendationThresholds,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl AnalysisPolicy {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("table-lens")
            .join("policy.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("TABLE_LENS_POLICY") {
            PathBuf::from(env_path) // $TABLE_LENS_POLICY overrides default path
        } else {
            Self::config_path()
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let policy: Self =
            toml::from_str(&content).map_err(|e| crate::TableLensError::Other(e.to_string()))?;
        Ok(policy)
    }

    pub fn save(&self) -> crate::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::TableLensError::Other(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}
