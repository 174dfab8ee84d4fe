use amal_core::{CatalogRepository, LogRepository, SqliteStore, Tracker};
use chrono::NaiveDate;
use clap::Subcommand;

use super::resolve_date;

#[derive(Subcommand)]
pub enum StatsAction {
    /// One day's headline numbers
    Summary {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Consecutive-day streak ending at a date
    Streak {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Lifetime totals and level
    All,
    /// Completion counts per category
    Categories,
    /// The level table in use
    Levels,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let tracker = Tracker::new(&store);

    match action {
        StatsAction::Summary { date } => {
            let summary = tracker.summary(resolve_date(date))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Streak { date } => {
            let summary = tracker.summary(resolve_date(date))?;
            println!("{}", summary.streak);
        }
        StatsAction::All => {
            let stats = tracker.lifetime()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Categories => {
            let catalog = CatalogRepository::new(&store).list()?;
            let logs = LogRepository::new(&store).get_all()?;
            let breakdown = amal_core::scoring::category_breakdown(&logs, &catalog);
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        StatsAction::Levels => {
            println!("{}", serde_json::to_string_pretty(tracker.level_table())?);
        }
    }
    Ok(())
}
