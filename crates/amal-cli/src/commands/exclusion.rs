use amal_core::{ExclusionReason, ExclusionRepository, SqliteStore};
use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ExclusionAction {
    /// List all exclusion periods
    List,
    /// Add a period during which tracking is suspended
    Add {
        start_date: NaiveDate,
        end_date: NaiveDate,
        /// Haid, Nifas, Sakit, or Lainnya
        #[arg(long, default_value = "Lainnya")]
        reason: ExclusionReason,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove a period by id
    Remove { id: String },
    /// Show the period covering a date, if any
    Check { date: NaiveDate },
}

pub fn run(action: ExclusionAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let repo = ExclusionRepository::new(&store);

    match action {
        ExclusionAction::List => {
            let periods = repo.list()?;
            println!("{}", serde_json::to_string_pretty(&periods)?);
        }
        ExclusionAction::Add {
            start_date,
            end_date,
            reason,
            note,
        } => {
            let period = repo.add(start_date, end_date, reason, note)?;
            println!(
                "Added exclusion {} .. {} ({})",
                period.start_date, period.end_date, period.reason
            );
        }
        ExclusionAction::Remove { id } => {
            repo.remove(&id)?;
            println!("Removed exclusion {id}");
        }
        ExclusionAction::Check { date } => match repo.find_covering(date)? {
            Some(period) => println!("{}", serde_json::to_string_pretty(&period)?),
            None => println!("No exclusion covers {date}"),
        },
    }
    Ok(())
}
