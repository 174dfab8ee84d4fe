//! Exclusion periods: date ranges during which tracking is suspended.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::storage::keys;
use crate::storage::kv::{read_json, write_json, KeyValueStore};

/// Fixed set of exclusion reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    Haid,
    Nifas,
    Sakit,
    Lainnya,
}

impl ExclusionReason {
    pub const ALL: [ExclusionReason; 4] = [
        ExclusionReason::Haid,
        ExclusionReason::Nifas,
        ExclusionReason::Sakit,
        ExclusionReason::Lainnya,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExclusionReason::Haid => "Haid",
            ExclusionReason::Nifas => "Nifas",
            ExclusionReason::Sakit => "Sakit",
            ExclusionReason::Lainnya => "Lainnya",
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExclusionReason {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ExclusionReason::ALL
            .iter()
            .find(|r| r.label().to_lowercase() == lower)
            .copied()
            .ok_or_else(|| format!("unknown exclusion reason '{s}'"))
    }
}

/// An inclusive date range during which tracking is suspended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionPeriod {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: ExclusionReason,
    #[serde(default)]
    pub note: String,
}

impl ExclusionPeriod {
    /// Interval containment test: `start <= date <= end`.
    ///
    /// An inverted range (end before start) matches nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Repository for exclusion periods.
pub struct ExclusionRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ExclusionRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All stored periods, in stored order. Empty list if none persisted.
    pub fn list(&self) -> Result<Vec<ExclusionPeriod>> {
        Ok(read_json(self.store, keys::EXCLUSIONS)?.unwrap_or_default())
    }

    /// Replace the whole persisted list.
    pub fn save(&self, periods: &[ExclusionPeriod]) -> Result<()> {
        write_json(self.store, keys::EXCLUSIONS, &periods)?;
        Ok(())
    }

    /// Append one period with a fresh id.
    ///
    /// Rejects ranges whose end precedes their start.
    pub fn add(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: ExclusionReason,
        note: String,
    ) -> Result<ExclusionPeriod> {
        if start_date > end_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            }
            .into());
        }

        let period = ExclusionPeriod {
            id: Uuid::new_v4().to_string(),
            start_date,
            end_date,
            reason,
            note,
        };

        let mut periods = self.list()?;
        periods.push(period.clone());
        self.save(&periods)?;
        tracing::debug!(id = %period.id, %start_date, %end_date, "added exclusion period");
        Ok(period)
    }

    /// Remove the period with the given id.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut periods = self.list()?;
        periods.retain(|p| p.id != id);
        self.save(&periods)?;
        Ok(())
    }

    /// First period (in stored order) whose range contains `date`.
    ///
    /// When periods overlap, the earliest stored match wins.
    pub fn find_covering(&self, date: NaiveDate) -> Result<Option<ExclusionPeriod>> {
        Ok(self.list()?.into_iter().find(|p| p.contains(date)))
    }
}
