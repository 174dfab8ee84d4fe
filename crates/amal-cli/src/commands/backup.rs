use std::path::PathBuf;

use amal_core::{BackupCodec, SqliteStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write a snapshot of the full state
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Restore state from a snapshot file
    Import { input: PathBuf },
}

pub fn run(action: BackupAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let codec = BackupCodec::new(&store);

    match action {
        BackupAction::Export { output } => {
            let snapshot = codec.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &snapshot)?;
                    println!("Exported backup to {}", path.display());
                }
                None => println!("{snapshot}"),
            }
        }
        BackupAction::Import { input } => {
            let raw = std::fs::read_to_string(&input)?;
            let summary = codec.import_json(&raw)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
