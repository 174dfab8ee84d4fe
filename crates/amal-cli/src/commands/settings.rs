use amal_core::{SettingsRepository, SqliteStore, UserSettings};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the stored settings
    Show,
    /// Set the display name (completes onboarding)
    SetName { name: String },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let repo = SettingsRepository::new(&store);

    match action {
        SettingsAction::Show => match repo.load()? {
            Some(settings) => println!("{}", serde_json::to_string_pretty(&settings)?),
            None => println!("No settings yet; run `amal settings set-name <name>`"),
        },
        SettingsAction::SetName { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err("name must not be empty".into());
            }
            repo.save(&UserSettings { name: name.clone() })?;
            println!("Assalammualaikum, {name}!");
        }
    }
    Ok(())
}
