use amal_core::{CatalogRepository, NewPractice, PracticeCategory, SqliteStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all practices
    List,
    /// Add a custom practice
    Add {
        name: String,
        /// Category label or slug (e.g. "sholat-sunnah")
        #[arg(long)]
        category: PracticeCategory,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "-")]
        target: String,
        #[arg(long)]
        points: u32,
    },
    /// Remove a practice by id
    Remove { id: String },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let repo = CatalogRepository::new(&store);

    match action {
        CatalogAction::List => {
            let catalog = repo.list()?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        CatalogAction::Add {
            name,
            category,
            description,
            target,
            points,
        } => {
            let practice = repo.add(NewPractice {
                name,
                category,
                description,
                target,
                points,
            })?;
            println!("Added practice '{}' ({})", practice.name, practice.id);
        }
        CatalogAction::Remove { id } => {
            repo.remove(&id)?;
            println!("Removed practice {id}");
        }
    }
    Ok(())
}
