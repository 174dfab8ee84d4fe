//! # Amal Core Library
//!
//! This library provides the core business logic for Amal, a local-first
//! tracker for daily devotional practices. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Storage**: a string-keyed store (SQLite `kv` table) holding one
//!   JSON document per collection; repositories take an injected storage
//!   handle, there is no ambient singleton
//! - **Repositories**: catalog, daily logs, exclusion periods, settings
//! - **Scoring**: pure functions for point totals, streaks, lifetime
//!   aggregates, and level lookup
//! - **Backup**: versioned snapshot export/import with fail-clean restore
//!
//! ## Key Components
//!
//! - [`Tracker`]: the toggle/edit flow over the repositories
//! - [`CatalogRepository`], [`LogRepository`], [`ExclusionRepository`],
//!   [`SettingsRepository`]: one per persisted collection
//! - [`BackupCodec`]: snapshot export/import
//! - [`SqliteStore`]: the default persistent store

pub mod backup;
pub mod catalog;
pub mod daily_log;
pub mod error;
pub mod exclusion;
pub mod scoring;
pub mod settings;
pub mod storage;
pub mod tasbih;
pub mod tracker;

pub use backup::{BackupCodec, BackupSnapshot, ImportSummary, BACKUP_VERSION};
pub use catalog::{default_catalog, CatalogRepository, NewPractice, Practice, PracticeCategory};
pub use daily_log::{DailyLog, LogMap, LogRepository, Mood, QuranProgress};
pub use error::{BackupError, CoreError, Result, StorageError, ValidationError};
pub use exclusion::{ExclusionPeriod, ExclusionReason, ExclusionRepository};
pub use scoring::{LevelBand, LevelTable};
pub use settings::{SettingsRepository, UserSettings};
pub use storage::{data_dir, KeyValueStore, MemoryStore, SqliteStore};
pub use tasbih::TasbihCounter;
pub use tracker::{DaySummary, LifetimeStats, ReflectionUpdate, Tracker};
