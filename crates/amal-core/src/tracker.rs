//! Tracker service: the toggle/edit flow over the repositories.
//!
//! Every mutation of a day's record goes through here so that
//! `total_points` is always recomputed by the one scoring function and
//! exclusion periods gate the toggle path.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::CatalogRepository;
use crate::daily_log::{DailyLog, LogRepository, Mood, QuranProgress};
use crate::error::{CoreError, Result};
use crate::exclusion::ExclusionRepository;
use crate::scoring::{self, LevelTable};
use crate::storage::KeyValueStore;

/// Snapshot of one day's headline numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_points: u32,
    pub max_points: u32,
    pub compliance_percent: u8,
    pub streak: u32,
    pub completed: usize,
    /// Reason label when the date falls in an exclusion period.
    pub excluded: Option<String>,
}

/// Lifetime aggregates across all stored records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    pub total_points: u64,
    pub completed: u64,
    pub active_days: u64,
    pub level: Option<String>,
}

/// Field edits applied to a day's reflective notes. `None` leaves the
/// field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReflectionUpdate {
    pub reflection: Option<String>,
    pub gratitude: Option<String>,
    pub hope: Option<String>,
}

/// Service facade over the four repositories.
pub struct Tracker<'a> {
    store: &'a dyn KeyValueStore,
    levels: LevelTable,
}

impl<'a> Tracker<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            store,
            levels: LevelTable::default(),
        }
    }

    /// Use a custom level table instead of the default bands.
    pub fn with_level_table(store: &'a dyn KeyValueStore, levels: LevelTable) -> Self {
        Self { store, levels }
    }

    /// Flip completion of `practice_id` for `date` and persist the record
    /// with a freshly recomputed point total.
    ///
    /// Refused with [`CoreError::DateExcluded`] when the date falls in an
    /// exclusion period; nothing is persisted in that case.
    pub fn toggle(&self, date: NaiveDate, practice_id: &str) -> Result<DailyLog> {
        if let Some(period) = ExclusionRepository::new(self.store).find_covering(date)? {
            return Err(CoreError::DateExcluded {
                date,
                reason: period.reason,
            });
        }

        let catalog = CatalogRepository::new(self.store).list()?;
        let logs = LogRepository::new(self.store);
        let mut log = logs.get(date)?;

        if let Some(pos) = log.completed_ids.iter().position(|id| id == practice_id) {
            log.completed_ids.remove(pos);
        } else {
            log.completed_ids.push(practice_id.to_string());
        }

        log.total_points = scoring::compute_total(&log.completed_ids, &catalog);
        logs.save(&log)?;
        tracing::info!(
            %date,
            practice = practice_id,
            completed = log.is_completed(practice_id),
            points = log.total_points,
            "toggled practice"
        );
        Ok(log)
    }

    /// Set or clear the day's mood.
    pub fn set_mood(&self, date: NaiveDate, mood: Option<Mood>) -> Result<DailyLog> {
        self.edit(date, |log| log.mood = mood)
    }

    /// Apply reflective-note edits. Point totals are untouched.
    pub fn update_reflection(&self, date: NaiveDate, update: ReflectionUpdate) -> Result<DailyLog> {
        self.edit(date, |log| {
            if let Some(reflection) = update.reflection {
                log.reflection = reflection;
            }
            if let Some(gratitude) = update.gratitude {
                log.gratitude = gratitude;
            }
            if let Some(hope) = update.hope {
                log.hope = hope;
            }
        })
    }

    /// Record the last reading position.
    pub fn update_quran_progress(
        &self,
        date: NaiveDate,
        surah: String,
        ayat: String,
    ) -> Result<DailyLog> {
        self.edit(date, |log| {
            log.quran_last_read = Some(QuranProgress { surah, ayat });
        })
    }

    fn edit(&self, date: NaiveDate, apply: impl FnOnce(&mut DailyLog)) -> Result<DailyLog> {
        let logs = LogRepository::new(self.store);
        let mut log = logs.get(date)?;
        apply(&mut log);
        logs.save(&log)?;
        Ok(log)
    }

    /// Headline numbers for one day.
    pub fn summary(&self, date: NaiveDate) -> Result<DaySummary> {
        let catalog = CatalogRepository::new(self.store).list()?;
        let logs = LogRepository::new(self.store).get_all()?;
        let log = logs
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyLog::empty(date));
        let max_points = scoring::max_daily_points(&catalog);
        let excluded = ExclusionRepository::new(self.store)
            .find_covering(date)?
            .map(|p| p.reason.to_string());

        Ok(DaySummary {
            date,
            total_points: log.total_points,
            max_points,
            compliance_percent: scoring::compliance_percent(log.total_points, max_points),
            streak: scoring::compute_streak(date, &logs),
            completed: log.completed_ids.len(),
            excluded,
        })
    }

    /// Lifetime aggregates and the level they map to.
    pub fn lifetime(&self) -> Result<LifetimeStats> {
        let logs = LogRepository::new(self.store).get_all()?;
        let total_points = scoring::lifetime_total(&logs);

        Ok(LifetimeStats {
            total_points,
            completed: scoring::completed_count(&logs),
            active_days: scoring::active_days(&logs),
            level: self
                .levels
                .level_for(total_points)
                .map(|band| band.label.clone()),
        })
    }

    /// The level table in use.
    pub fn level_table(&self) -> &LevelTable {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_log::LogRepository;
    use crate::exclusion::ExclusionReason;
    use crate::storage::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_toggle_on_recomputes_points() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        let log = tracker.toggle(date("2024-05-01"), "1").unwrap();
        assert!(log.is_completed("1"));
        assert_eq!(log.total_points, 5); // Dzikir Pagi

        let log = tracker.toggle(date("2024-05-01"), "13").unwrap();
        assert_eq!(log.total_points, 15); // + Sholat Subuh
    }

    #[test]
    fn test_toggle_off_removes_and_recomputes() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        tracker.toggle(date("2024-05-01"), "1").unwrap();
        let log = tracker.toggle(date("2024-05-01"), "1").unwrap();
        assert!(!log.is_completed("1"));
        assert_eq!(log.total_points, 0);
    }

    #[test]
    fn test_toggle_refused_on_excluded_date() {
        let store = MemoryStore::new();
        ExclusionRepository::new(&store)
            .add(
                date("2024-06-01"),
                date("2024-06-05"),
                ExclusionReason::Sakit,
                String::new(),
            )
            .unwrap();

        let tracker = Tracker::new(&store);
        let err = tracker.toggle(date("2024-06-03"), "1").unwrap_err();
        assert!(matches!(err, CoreError::DateExcluded { .. }));

        // Nothing persisted.
        assert!(LogRepository::new(&store).get_all().unwrap().is_empty());
    }

    #[test]
    fn test_reflection_edits_leave_points_alone() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        tracker.toggle(date("2024-05-01"), "1").unwrap();
        let log = tracker
            .update_reflection(
                date("2024-05-01"),
                ReflectionUpdate {
                    gratitude: Some("Alhamdulillah".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(log.gratitude, "Alhamdulillah");
        assert_eq!(log.reflection, "");
        assert_eq!(log.total_points, 5);
    }

    #[test]
    fn test_mood_and_quran_edits_persist() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        tracker.set_mood(date("2024-05-01"), Some(Mood::Content)).unwrap();
        tracker
            .update_quran_progress(date("2024-05-01"), "Al-Baqarah".to_string(), "10-15".to_string())
            .unwrap();

        let log = LogRepository::new(&store).get(date("2024-05-01")).unwrap();
        assert_eq!(log.mood, Some(Mood::Content));
        assert_eq!(log.quran_last_read.unwrap().surah, "Al-Baqarah");
    }

    #[test]
    fn test_summary_reports_compliance_and_streak() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        tracker.toggle(date("2024-05-01"), "13").unwrap();
        tracker.toggle(date("2024-05-02"), "13").unwrap();

        let summary = tracker.summary(date("2024-05-02")).unwrap();
        assert_eq!(summary.total_points, 10);
        assert_eq!(summary.streak, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.excluded, None);
        // Default catalog carries 131 max daily points.
        assert_eq!(summary.max_points, 131);
        assert_eq!(summary.compliance_percent, 8);
    }

    #[test]
    fn test_lifetime_maps_level_from_table() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);

        // Two days of Sholat Wajib x5 = 100 points lifetime.
        for day in ["2024-05-01", "2024-05-02"] {
            for id in ["13", "14", "15", "16", "17"] {
                tracker.toggle(date(day), id).unwrap();
            }
        }

        let stats = tracker.lifetime().unwrap();
        assert_eq!(stats.total_points, 100);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.completed, 10);
        assert_eq!(stats.level.as_deref(), Some("Menengah"));
    }
}
