pub mod backup;
pub mod catalog;
pub mod exclusion;
pub mod log;
pub mod settings;
pub mod stats;

use chrono::NaiveDate;

/// Explicit `--date` override, or today in local time.
pub(crate) fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}
