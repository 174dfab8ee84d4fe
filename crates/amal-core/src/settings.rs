//! User settings.
//!
//! Presence of a persisted settings record is the "has completed
//! onboarding" signal; there is no separate flag.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::keys;
use crate::storage::kv::{read_json, write_json, KeyValueStore};

/// Per-user settings. Overwritten whole on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub name: String,
}

/// Repository for the settings record.
pub struct SettingsRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored settings, or `None` before onboarding.
    ///
    /// The settings key may hold JSON `null` after restoring a snapshot
    /// that predates onboarding; that reads back as `None` too.
    pub fn load(&self) -> Result<Option<UserSettings>> {
        Ok(read_json::<Option<UserSettings>>(self.store, keys::SETTINGS)?.flatten())
    }

    /// Overwrite the settings record.
    pub fn save(&self, settings: &UserSettings) -> Result<()> {
        write_json(self.store, keys::SETTINGS, settings)?;
        tracing::debug!(name = %settings.name, "saved user settings");
        Ok(())
    }

    /// Whether onboarding has completed.
    pub fn is_onboarded(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_absent_settings_means_not_onboarded() {
        let store = MemoryStore::new();
        let repo = SettingsRepository::new(&store);

        assert_eq!(repo.load().unwrap(), None);
        assert!(!repo.is_onboarded().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let repo = SettingsRepository::new(&store);

        repo.save(&UserSettings { name: "Ani".to_string() }).unwrap();
        assert_eq!(repo.load().unwrap().unwrap().name, "Ani");
        assert!(repo.is_onboarded().unwrap());
    }

    #[test]
    fn test_null_settings_reads_as_none() {
        let store = MemoryStore::new();
        store.set(keys::SETTINGS, "null").unwrap();

        let repo = SettingsRepository::new(&store);
        assert_eq!(repo.load().unwrap(), None);
        assert!(!repo.is_onboarded().unwrap());
    }
}
