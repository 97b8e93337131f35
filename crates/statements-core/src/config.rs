//! Run configuration.
//!
//! [`AnalysisConfig`] carries the analysis window and the stress haircuts.
//! [`RunContext`] bundles it with everything else a single run needs (the filer, the
//! identifying user agent, the output directory) so nothing is read from ambient state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StatementsError};
use crate::types::{Filer, FiscalYear};

/// Percentage label of a haircut: whole percentages without a decimal (`0.15 -> "15"`),
/// others as computed (`0.125 -> "12.5"`).
///
/// Two haircuts with the same label are the same haircut.
#[must_use]
pub fn haircut_percent(haircut: f64) -> String {
    let pct = haircut * 100.0;
    let rounded = pct.round();
    if (pct - rounded).abs() < 1e-9 {
        format!("{rounded:.0}")
    } else {
        format!("{pct}")
    }
}

/// Closed range of fiscal years considered by a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    /// First fiscal year included.
    pub min: FiscalYear,
    /// Last fiscal year included.
    pub max: FiscalYear,
}

impl YearRange {
    /// Creates a year range.
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] if `min > max`.
    pub fn new(min: FiscalYear, max: FiscalYear) -> Result<Self> {
        if min > max {
            return Err(StatementsError::InvalidParameter(format!(
                "Year range start {min} is after end {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Returns true if `year` falls inside the range (both ends inclusive).
    #[must_use]
    pub const fn contains(&self, year: FiscalYear) -> bool {
        self.min <= year && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 2014,
            max: 2025,
        }
    }
}

/// Parameters of the analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fiscal years considered.
    pub year_range: YearRange,
    /// Fractional drops applied to marketable securities, one stress ratio each.
    pub stress_haircuts: Vec<f64>,
    /// Taxonomy the concept catalogs refer to.
    pub taxonomy: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            year_range: YearRange::default(),
            stress_haircuts: vec![0.10, 0.15, 0.25],
            taxonomy: "us-gaap".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Sets the year range.
    #[must_use]
    pub const fn with_year_range(mut self, year_range: YearRange) -> Self {
        self.year_range = year_range;
        self
    }

    /// Sets the stress haircuts.
    #[must_use]
    pub fn with_stress_haircuts(mut self, haircuts: Vec<f64>) -> Self {
        self.stress_haircuts = haircuts;
        self
    }

    /// Checks the configuration for values no run can use.
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] for an inverted year range, a
    /// haircut outside `[0, 1)`, a duplicated haircut or an empty taxonomy.
    pub fn validate(&self) -> Result<()> {
        YearRange::new(self.year_range.min, self.year_range.max)?;
        for (i, h) in self.stress_haircuts.iter().enumerate() {
            if !(0.0..1.0).contains(h) {
                return Err(StatementsError::InvalidParameter(format!(
                    "Stress haircut {h} is outside [0, 1)"
                )));
            }
            let label = haircut_percent(*h);
            if self.stress_haircuts[..i]
                .iter()
                .any(|prev| haircut_percent(*prev) == label)
            {
                return Err(StatementsError::InvalidParameter(format!(
                    "Stress haircut {h} is listed twice ({label}%)"
                )));
            }
        }
        if self.taxonomy.trim().is_empty() {
            return Err(StatementsError::InvalidParameter(
                "Taxonomy must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file. Missing fields take
    /// their default values.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or fails
    /// [`validate`](Self::validate).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StatementsError::InvalidParameter(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            StatementsError::InvalidParameter(format!("Invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Everything a single run needs, passed explicitly into the pipeline.
#[derive(Clone, Debug)]
pub struct RunContext {
    /// Filer whose statements are produced.
    pub filer: Filer,
    /// Identifying user agent sent to the disclosure source.
    pub user_agent: String,
    /// Analysis parameters.
    pub config: AnalysisConfig,
    /// Directory tables are written to.
    pub output_dir: PathBuf,
}

impl RunContext {
    /// Creates a context with the default configuration, writing to the current directory.
    #[must_use]
    pub fn new(filer: Filer, user_agent: impl Into<String>) -> Self {
        Self {
            filer,
            user_agent: user_agent.into(),
            config: AnalysisConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Sets the analysis configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
