use crate::date_parser::parse_date_str;
use crate::error::{Result, TrackerError};
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Header names of the tracked columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub candidate_date: String,
    pub candidate_followup: String,
    pub client_date: String,
    pub client_followup: String,
    pub status: String,
    pub remark_date: String,
    pub candidate_gap: String,
    pub client_gap: String,
    pub remark_gap: String,
}

impl ColumnNames {
    pub fn all(&self) -> [&str; 9] {
        [
            &self.candidate_date,
            &self.candidate_followup,
            &self.client_date,
            &self.client_followup,
            &self.status,
            &self.remark_date,
            &self.candidate_gap,
            &self.client_gap,
            &self.remark_gap,
        ]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            candidate_date: "Cand_Date_update".to_string(),
            candidate_followup: "Cand_followup".to_string(),
            client_date: "Client_Date_update".to_string(),
            client_followup: "Client_followup".to_string(),
            status: "Status".to_string(),
            remark_date: "Remark_date_change".to_string(),
            candidate_gap: "candidate_gap".to_string(),
            client_gap: "client_gap".to_string(),
            remark_gap: "Remark_gap".to_string(),
        }
    }
}

/// Tracker settings.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub columns: ColumnNames,

    /// chrono format used when a status change stamps the remark date.
    /// Must stay day-month-year so the stamp parses back.
    pub remark_date_format: String,

    /// Rows whose remark date is one of these keep their stored gaps during
    /// batch recomputes.
    pub excluded_remark_dates: BTreeSet<NaiveDate>,

    /// Row numbers left alone by batch recomputes.
    pub excluded_rows: BTreeSet<usize>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            columns: ColumnNames::default(),
            remark_date_format: "%d/%m/%Y".to_string(),
            excluded_remark_dates: BTreeSet::new(),
            excluded_rows: BTreeSet::new(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: TrackerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.remark_date_format.trim().is_empty() {
            return Err(TrackerError::Config(
                "remark_date_format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.remark_date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TrackerError::Config(format!(
                "invalid remark_date_format '{}'",
                self.remark_date_format
            )));
        }
        // Stamps are read back by the date parser, so the format has to
        // survive a format-then-parse round trip.
        let samples = [(2025, 12, 31), (2025, 1, 2)];
        for (y, m, d) in samples {
            let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
                continue;
            };
            let mut stamp = String::new();
            write!(stamp, "{}", date.format(&self.remark_date_format)).map_err(|_| {
                TrackerError::Config(format!(
                    "invalid remark_date_format '{}'",
                    self.remark_date_format
                ))
            })?;
            if parse_date_str(&stamp) != Some(date) {
                return Err(TrackerError::Config(format!(
                    "remark_date_format '{}' must produce day/month/year with a four-digit year",
                    self.remark_date_format
                )));
            }
        }
        let mut seen = HashSet::new();
        for name in self.columns.all() {
            if !seen.insert(name.trim()) {
                return Err(TrackerError::Config(format!(
                    "column name '{}' is used for more than one column",
                    name
                )));
            }
        }
        if self.excluded_rows.contains(&0) || self.excluded_rows.contains(&1) {
            return Err(TrackerError::Config(
                "excluded_rows must only name data rows (2 and above)".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether batch recomputes should leave this row's gaps untouched.
    pub fn is_excluded(&self, row: usize, remark_date: Option<NaiveDate>) -> bool {
        if self.excluded_rows.contains(&row) {
            return true;
        }
        remark_date.is_some_and(|d| self.excluded_remark_dates.contains(&d))
    }

    pub fn has_exclusions(&self) -> bool {
        !self.excluded_rows.is_empty() || !self.excluded_remark_dates.is_empty()
    }
}
