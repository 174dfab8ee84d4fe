//! Versioned backup snapshots of the full persisted state.
//!
//! The snapshot is a single JSON object; `logs` and `ibadahList` are
//! required on import, everything else defaults. Import validates the
//! whole snapshot before touching storage and then writes all four
//! collections as one group, so a bad snapshot never leaves partial
//! state behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Practice;
use crate::daily_log::LogMap;
use crate::error::{BackupError, Result, StorageError};
use crate::exclusion::ExclusionPeriod;
use crate::settings::UserSettings;
use crate::storage::keys;
use crate::storage::kv::{read_json, KeyValueStore};

/// Current snapshot format version.
pub const BACKUP_VERSION: &str = "1.0";

/// Complete state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub settings: Option<UserSettings>,
    #[serde(rename = "ibadahList")]
    pub ibadah_list: Vec<Practice>,
    pub logs: LogMap,
    pub exclusions: Vec<ExclusionPeriod>,
    pub version: String,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

/// Import-side view: every field optional so that presence of the two
/// required collections can be reported precisely.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    settings: Option<UserSettings>,
    #[serde(rename = "ibadahList")]
    ibadah_list: Option<Vec<Practice>>,
    logs: Option<LogMap>,
    #[serde(default)]
    exclusions: Option<Vec<ExclusionPeriod>>,
}

/// What an import wrote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub practices: usize,
    pub logs: usize,
    pub exclusions: usize,
    pub has_settings: bool,
}

/// Backup codec over a storage handle.
pub struct BackupCodec<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> BackupCodec<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Snapshot the full persisted state.
    pub fn export(&self) -> Result<BackupSnapshot> {
        Ok(BackupSnapshot {
            settings: read_json::<Option<UserSettings>>(self.store, keys::SETTINGS)?.flatten(),
            ibadah_list: read_json(self.store, keys::CATALOG)?.unwrap_or_default(),
            logs: read_json(self.store, keys::LOGS)?.unwrap_or_default(),
            exclusions: read_json(self.store, keys::EXCLUSIONS)?.unwrap_or_default(),
            version: BACKUP_VERSION.to_string(),
            export_date: Utc::now(),
        })
    }

    /// Snapshot the full persisted state as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        let snapshot = self.export()?;
        serde_json::to_string_pretty(&snapshot).map_err(|source| {
            StorageError::Encode {
                key: "backup".to_string(),
                source,
            }
            .into()
        })
    }

    /// Restore state from snapshot JSON.
    ///
    /// Requires `logs` and `ibadahList`; missing either is a hard
    /// validation failure. On success all four collections are
    /// overwritten as one group; on any failure nothing is written.
    pub fn import_json(&self, raw: &str) -> Result<ImportSummary> {
        let snapshot: RawSnapshot = serde_json::from_str(raw).map_err(BackupError::Parse)?;

        let ibadah_list = snapshot
            .ibadah_list
            .ok_or(BackupError::MissingField("ibadahList"))?;
        let logs = snapshot.logs.ok_or(BackupError::MissingField("logs"))?;
        let exclusions = snapshot.exclusions.unwrap_or_default();

        let catalog_raw = to_raw(keys::CATALOG, &ibadah_list)?;
        let logs_raw = to_raw(keys::LOGS, &logs)?;
        let exclusions_raw = to_raw(keys::EXCLUSIONS, &exclusions)?;
        // Absent settings restore as JSON null, which reads back as
        // "not onboarded".
        let settings_raw = to_raw(keys::SETTINGS, &snapshot.settings)?;

        self.store.set_many(&[
            (keys::CATALOG, catalog_raw),
            (keys::LOGS, logs_raw),
            (keys::EXCLUSIONS, exclusions_raw),
            (keys::SETTINGS, settings_raw),
        ])?;

        let summary = ImportSummary {
            practices: ibadah_list.len(),
            logs: logs.len(),
            exclusions: exclusions.len(),
            has_settings: snapshot.settings.is_some(),
        };
        tracing::info!(
            practices = summary.practices,
            logs = summary.logs,
            exclusions = summary.exclusions,
            "imported backup snapshot"
        );
        Ok(summary)
    }
}

fn to_raw<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRepository;
    use crate::daily_log::LogRepository;
    use crate::exclusion::{ExclusionReason, ExclusionRepository};
    use crate::settings::SettingsRepository;
    use crate::storage::MemoryStore;
    use crate::tracker::Tracker;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store);
        tracker.toggle(date("2024-05-01"), "1").unwrap();
        tracker.toggle(date("2024-05-02"), "13").unwrap();
        ExclusionRepository::new(&store)
            .add(date("2024-06-01"), date("2024-06-05"), ExclusionReason::Sakit, String::new())
            .unwrap();
        SettingsRepository::new(&store)
            .save(&UserSettings { name: "Ani".to_string() })
            .unwrap();
        store
    }

    #[test]
    fn test_export_import_roundtrip() {
        let source = seeded_store();
        let exported = BackupCodec::new(&source).export_json().unwrap();

        let target = MemoryStore::new();
        let summary = BackupCodec::new(&target).import_json(&exported).unwrap();
        assert_eq!(summary.practices, 18);
        assert_eq!(summary.logs, 2);
        assert_eq!(summary.exclusions, 1);
        assert!(summary.has_settings);

        assert_eq!(
            CatalogRepository::new(&source).list().unwrap(),
            CatalogRepository::new(&target).list().unwrap()
        );
        assert_eq!(
            LogRepository::new(&source).get_all().unwrap(),
            LogRepository::new(&target).get_all().unwrap()
        );
        assert_eq!(
            ExclusionRepository::new(&source).list().unwrap(),
            ExclusionRepository::new(&target).list().unwrap()
        );
        assert_eq!(
            SettingsRepository::new(&target).load().unwrap().unwrap().name,
            "Ani"
        );
    }

    #[test]
    fn test_import_rejects_missing_logs() {
        let store = seeded_store();
        let before = BackupCodec::new(&store).export().unwrap();

        let snapshot = r#"{"ibadahList": [], "version": "1.0"}"#;
        let err = BackupCodec::new(&store).import_json(snapshot).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Backup(BackupError::MissingField("logs"))
        ));

        // Nothing was written.
        let after = BackupCodec::new(&store).export().unwrap();
        assert_eq!(before.logs, after.logs);
        assert_eq!(before.ibadah_list, after.ibadah_list);
        assert_eq!(before.exclusions, after.exclusions);
        assert_eq!(before.settings, after.settings);
    }

    #[test]
    fn test_import_rejects_missing_catalog() {
        let store = MemoryStore::new();
        let snapshot = r#"{"logs": {}, "version": "1.0"}"#;
        let err = BackupCodec::new(&store).import_json(snapshot).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Backup(BackupError::MissingField("ibadahList"))
        ));
    }

    #[test]
    fn test_import_rejects_unparseable_snapshot() {
        let store = seeded_store();
        let before = BackupCodec::new(&store).export().unwrap();

        let err = BackupCodec::new(&store).import_json("{ not json").unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Backup(BackupError::Parse(_))
        ));

        let after = BackupCodec::new(&store).export().unwrap();
        assert_eq!(before.logs, after.logs);
    }

    #[test]
    fn test_import_without_settings_restores_not_onboarded() {
        let store = seeded_store();
        assert!(SettingsRepository::new(&store).is_onboarded().unwrap());

        let snapshot = r#"{"ibadahList": [], "logs": {}}"#;
        let summary = BackupCodec::new(&store).import_json(snapshot).unwrap();
        assert!(!summary.has_settings);
        assert!(!SettingsRepository::new(&store).is_onboarded().unwrap());
    }

    #[test]
    fn test_export_carries_version_and_timestamp() {
        let store = seeded_store();
        let json = BackupCodec::new(&store).export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], BACKUP_VERSION);
        assert!(value["exportDate"].is_string());
        assert!(value["ibadahList"].is_array());
        assert!(value["logs"].is_object());
    }
}
