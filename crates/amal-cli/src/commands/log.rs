use amal_core::{Mood, ReflectionUpdate, SqliteStore, Tracker};
use chrono::NaiveDate;
use clap::Subcommand;

use super::resolve_date;

#[derive(Subcommand)]
pub enum LogAction {
    /// Show the record for a day
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Toggle completion of a practice
    Toggle {
        practice_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set the day's mood (sad|worried|neutral|content|joyful, or the emoji)
    Mood {
        mood: Mood,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Clear the day's mood
    ClearMood {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Update reflective notes
    Reflect {
        #[arg(long)]
        reflection: Option<String>,
        #[arg(long)]
        gratitude: Option<String>,
        #[arg(long)]
        hope: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record the last Qur'an reading position
    Quran {
        surah: String,
        ayat: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let tracker = Tracker::new(&store);

    match action {
        LogAction::Show { date } => {
            let log = amal_core::LogRepository::new(&store).get(resolve_date(date))?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        LogAction::Toggle { practice_id, date } => {
            let log = tracker.toggle(resolve_date(date), &practice_id)?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        LogAction::Mood { mood, date } => {
            tracker.set_mood(resolve_date(date), Some(mood))?;
            println!("Mood set to {mood}");
        }
        LogAction::ClearMood { date } => {
            tracker.set_mood(resolve_date(date), None)?;
            println!("Mood cleared");
        }
        LogAction::Reflect {
            reflection,
            gratitude,
            hope,
            date,
        } => {
            let log = tracker.update_reflection(
                resolve_date(date),
                ReflectionUpdate {
                    reflection,
                    gratitude,
                    hope,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        LogAction::Quran { surah, ayat, date } => {
            tracker.update_quran_progress(resolve_date(date), surah, ayat)?;
            println!("Reading position saved");
        }
    }
    Ok(())
}
