//! Scoring, streak, and level computation.
//!
//! Pure functions over the catalog and the log map. Every stored
//! `total_points` value is produced by [`compute_total`]; nothing else in
//! the crate writes that field.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{Practice, PracticeCategory};
use crate::daily_log::LogMap;

/// Hard ceiling on the backward streak scan. The walk normally stops at
/// the first zero/missing day; the cap only guards degenerate data.
pub const STREAK_SCAN_DAYS: u64 = 365;

/// Sum of point values for every completed id found in the catalog.
///
/// Ids with no catalog entry contribute zero: completions orphaned by a
/// catalog removal are silently excluded, not an error.
pub fn compute_total(completed_ids: &[String], catalog: &[Practice]) -> u32 {
    completed_ids
        .iter()
        .filter_map(|id| catalog.iter().find(|p| &p.id == id))
        .map(|p| p.points)
        .sum()
}

/// Count of consecutive days with positive points, walking backward from
/// `reference`.
///
/// The reference day counts as day 1 when it has positive points. A
/// zero-point or missing reference day does not break the streak: the
/// walk still proceeds from the previous day, so a user who has not yet
/// acted today keeps yesterday's streak until a full day passes with no
/// activity.
pub fn compute_streak(reference: NaiveDate, logs: &LogMap) -> u32 {
    let mut streak = 0;

    if logs.get(&reference).is_some_and(|l| l.total_points > 0) {
        streak += 1;
    }

    for offset in 1..STREAK_SCAN_DAYS {
        let Some(day) = reference.checked_sub_days(Days::new(offset)) else {
            break;
        };
        match logs.get(&day) {
            Some(log) if log.total_points > 0 => streak += 1,
            _ => break,
        }
    }

    streak
}

/// Sum of stored point totals across every record.
pub fn lifetime_total(logs: &LogMap) -> u64 {
    logs.values().map(|l| u64::from(l.total_points)).sum()
}

/// Total number of completions across every record.
pub fn completed_count(logs: &LogMap) -> u64 {
    logs.values().map(|l| l.completed_ids.len() as u64).sum()
}

/// Number of days with positive points.
pub fn active_days(logs: &LogMap) -> u64 {
    logs.values().filter(|l| l.total_points > 0).count() as u64
}

/// Completion counts per category, resolved against the current catalog.
///
/// Orphaned ids are skipped, mirroring [`compute_total`].
pub fn category_breakdown(
    logs: &LogMap,
    catalog: &[Practice],
) -> BTreeMap<PracticeCategory, u64> {
    let mut counts = BTreeMap::new();
    for log in logs.values() {
        for id in &log.completed_ids {
            if let Some(practice) = catalog.iter().find(|p| &p.id == id) {
                *counts.entry(practice.category).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Day-level compliance: earned points as a rounded percentage of the
/// maximum achievable points. Zero when the catalog carries no points.
pub fn compliance_percent(total_points: u32, max_points: u32) -> u8 {
    if max_points == 0 {
        return 0;
    }
    let pct = (f64::from(total_points) / f64::from(max_points) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Maximum points achievable in one day with the given catalog.
pub fn max_daily_points(catalog: &[Practice]) -> u32 {
    catalog.iter().map(|p| p.points).sum()
}

/// One band of the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBand {
    /// Minimum lifetime points to reach this band.
    pub min_points: u64,
    pub label: String,
}

/// Ordered ascending threshold table mapping lifetime points to a level.
///
/// Bands may be arbitrary and non-uniform; this is a table lookup, not a
/// formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    bands: Vec<LevelBand>,
}

impl LevelTable {
    /// Build a table from bands, sorting ascending by threshold.
    pub fn new(mut bands: Vec<LevelBand>) -> Self {
        bands.sort_by_key(|b| b.min_points);
        Self { bands }
    }

    pub fn bands(&self) -> &[LevelBand] {
        &self.bands
    }

    /// The highest band whose minimum does not exceed `lifetime_total`,
    /// falling back to the lowest-defined band. `None` only for an empty
    /// table.
    pub fn level_for(&self, lifetime_total: u64) -> Option<&LevelBand> {
        self.bands
            .iter()
            .rev()
            .find(|b| b.min_points <= lifetime_total)
            .or_else(|| self.bands.first())
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let band = |min_points, label: &str| LevelBand {
            min_points,
            label: label.to_string(),
        };
        Self::new(vec![
            band(0, "Pemula"),
            band(100, "Menengah"),
            band(500, "Mahir"),
        ])
    }
}
