//! Cleaning policy configuration.

use serde::{Deserialize, Serialize};

use crate::input::{AGE_COLUMN, SALARY_COLUMN};

/// What to do with missing cells in text columns after the row filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum TextMissingPolicy {
    /// Leave them missing. Only numeric columns are imputed.
    #[default]
    Preserve,
    /// Fill with the most frequent non-missing value of the column.
    Mode,
    /// Fill with a fixed value.
    Sentinel(String),
}

impl std::str::FromStr for TextMissingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" | "keep" => Ok(TextMissingPolicy::Preserve),
            "mode" => Ok(TextMissingPolicy::Mode),
            other => match other.strip_prefix("sentinel:") {
                // Keep the original casing of the sentinel value
                Some(_) => Ok(TextMissingPolicy::Sentinel(s["sentinel:".len()..].to_string())),
                None => Err(format!(
                    "Unknown text policy: {}. Use preserve, mode, or sentinel:<value>.",
                    s
                )),
            },
        }
    }
}

impl std::fmt::Display for TextMissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextMissingPolicy::Preserve => write!(f, "preserve"),
            TextMissingPolicy::Mode => write!(f, "mode"),
            TextMissingPolicy::Sentinel(value) => write!(f, "sentinel:{}", value),
        }
    }
}

/// Thresholds and column roles used by the cleaning engine.
///
/// The defaults reproduce the fixed policy: zero checks on the age and salary
/// columns, rejection of rows with empty text, numeric median imputation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningPolicy {
    /// Column whose zero value marks a degenerate row.
    pub age_column: String,
    /// Second column whose zero value marks a degenerate row.
    pub salary_column: String,
    /// Drop rows holding an empty string in any text column.
    pub reject_empty_text: bool,
    /// Handling of text cells that are still missing after filtering.
    pub text_missing: TextMissingPolicy,
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            age_column: AGE_COLUMN.to_string(),
            salary_column: SALARY_COLUMN.to_string(),
            reject_empty_text: true,
            text_missing: TextMissingPolicy::Preserve,
        }
    }
}

impl CleaningPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text missing-value policy.
    pub fn with_text_missing(mut self, policy: TextMissingPolicy) -> Self {
        self.text_missing = policy;
        self
    }

    /// Set the two columns checked for degenerate zeros.
    pub fn with_zero_columns(
        mut self,
        age_column: impl Into<String>,
        salary_column: impl Into<String>,
    ) -> Self {
        self.age_column = age_column.into();
        self.salary_column = salary_column.into();
        self
    }
}
