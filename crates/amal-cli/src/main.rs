use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "amal", version, about = "Amal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily log operations
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Practice catalog management
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Exclusion period management
    Exclusion {
        #[command(subcommand)]
        action: commands::exclusion::ExclusionAction,
    },
    /// Statistics, streaks, and levels
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Backup export/import
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// User settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { action } => commands::log::run(action),
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Exclusion { action } => commands::exclusion::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Backup { action } => commands::backup::run(action),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
