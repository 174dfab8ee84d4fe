//! Practice catalog: trackable devotional acts and their point values.
//!
//! The catalog is one persisted list. First read seeds the built-in set of
//! 18 practices; user-added entries carry `is_custom = true` and a UUID id.
//! Entries are immutable once created -- there is no edit-in-place, only
//! add and remove.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::storage::keys;
use crate::storage::kv::{read_json, write_json, KeyValueStore};

/// Fixed set of practice categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PracticeCategory {
    #[serde(rename = "Dzikir dan Doa")]
    DzikirDanDoa,
    #[serde(rename = "Puasa Sunnah")]
    PuasaSunnah,
    #[serde(rename = "Sedekah")]
    Sedekah,
    #[serde(rename = "Sholat Sunnah")]
    SholatSunnah,
    #[serde(rename = "Sholat Wajib")]
    SholatWajib,
    #[serde(rename = "Tilawah Al Qur’an")]
    TilawahAlQuran,
}

impl PracticeCategory {
    /// All categories in display order.
    pub const ALL: [PracticeCategory; 6] = [
        PracticeCategory::DzikirDanDoa,
        PracticeCategory::PuasaSunnah,
        PracticeCategory::Sedekah,
        PracticeCategory::SholatSunnah,
        PracticeCategory::SholatWajib,
        PracticeCategory::TilawahAlQuran,
    ];

    /// Canonical display label (also the wire encoding).
    pub fn label(&self) -> &'static str {
        match self {
            PracticeCategory::DzikirDanDoa => "Dzikir dan Doa",
            PracticeCategory::PuasaSunnah => "Puasa Sunnah",
            PracticeCategory::Sedekah => "Sedekah",
            PracticeCategory::SholatSunnah => "Sholat Sunnah",
            PracticeCategory::SholatWajib => "Sholat Wajib",
            PracticeCategory::TilawahAlQuran => "Tilawah Al Qur’an",
        }
    }
}

impl std::fmt::Display for PracticeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PracticeCategory {
    type Err = String;

    /// Accepts the canonical label or a lowercase slug (`puasa-sunnah`,
    /// `tilawah-al-quran`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        fn slugify(s: &str) -> String {
            s.to_lowercase().replace(' ', "-").replace('’', "")
        }
        let slug = slugify(s.trim());
        PracticeCategory::ALL
            .iter()
            .find(|c| c.label() == s || slugify(c.label()) == slug)
            .copied()
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// One trackable devotional act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    /// Opaque stable id. Seeded entries keep their legacy numeric ids;
    /// user-added entries get a UUID.
    pub id: String,
    pub name: String,
    pub category: PracticeCategory,
    pub description: String,
    /// Free-text target, not machine-checked (e.g. "100x", "1 Juz/Hari").
    pub target: String,
    pub points: u32,
    /// Distinguishes user-added entries from the seeded defaults.
    #[serde(default)]
    pub is_custom: bool,
}

/// A new practice to be added to the catalog.
#[derive(Debug, Clone)]
pub struct NewPractice {
    pub name: String,
    pub category: PracticeCategory,
    pub description: String,
    pub target: String,
    pub points: u32,
}

/// Repository for the practice catalog.
pub struct CatalogRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All practice definitions.
    ///
    /// Seeds the built-in catalog on first read and persists it before
    /// returning. Seeding runs only while storage is empty; it never
    /// merges with user edits.
    pub fn list(&self) -> Result<Vec<Practice>> {
        match read_json(self.store, keys::CATALOG)? {
            Some(catalog) => Ok(catalog),
            None => {
                let seeded = default_catalog();
                write_json(self.store, keys::CATALOG, &seeded)?;
                tracing::info!(count = seeded.len(), "seeded default catalog");
                Ok(seeded)
            }
        }
    }

    /// Replace the whole persisted catalog.
    pub fn save(&self, catalog: &[Practice]) -> Result<()> {
        write_json(self.store, keys::CATALOG, &catalog)?;
        Ok(())
    }

    /// Append one user-defined practice and return it.
    pub fn add(&self, new: NewPractice) -> Result<Practice> {
        if new.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let practice = Practice {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            description: new.description,
            target: new.target,
            points: new.points,
            is_custom: true,
        };

        let mut catalog = self.list()?;
        catalog.push(practice.clone());
        self.save(&catalog)?;
        tracing::debug!(id = %practice.id, name = %practice.name, "added practice");
        Ok(practice)
    }

    /// Remove the practice with the given id.
    ///
    /// Historical log records that reference the id are left untouched;
    /// orphaned completions simply stop contributing to recomputed totals.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut catalog = self.list()?;
        catalog.retain(|p| p.id != id);
        self.save(&catalog)?;
        tracing::debug!(id, "removed practice");
        Ok(())
    }
}

/// The built-in catalog seeded on first run.
pub fn default_catalog() -> Vec<Practice> {
    let seed = |id: &str, name: &str, category, description: &str, target: &str, points| Practice {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        target: target.to_string(),
        points,
        is_custom: false,
    };

    use PracticeCategory::*;
    vec![
        seed("1", "Dzikir Pagi", DzikirDanDoa, "Dzikir Setelah Shalat Subuh", "1x", 5),
        seed("2", "Dzikir Petang", DzikirDanDoa, "Dzikir Setelah Shalat Ashar", "1x", 5),
        seed("3", "Istighfar", DzikirDanDoa, "Memohon Ampun Kepada Allah", "100x", 3),
        seed("4", "Tasbih, Tahmid, Takbir", DzikirDanDoa, "Dzikir Setelah Shalat", "Setiap Sholat", 2),
        seed("5", "Puasa Ayyamul Bidh", PuasaSunnah, "Puasa Tanggal 13, 14 ,15 Hijriah", "Bulanan", 12),
        seed("6", "Puasa Senin Kamis", PuasaSunnah, "Puasa Sunah Hari Senin dan Kamis", "Mingguan", 15),
        seed("7", "Infaq di Mesjid", Sedekah, "Berinfaq untuk Mesjid", "Harian", 8),
        seed("8", "Sedekah Harian", Sedekah, "Bersedekah setiap Hari", "Harian", 10),
        seed("9", "Sholat Tahajjud", SholatSunnah, "Sholat Sunnah Malam", "Min 2 Rakaat", 8),
        seed("10", "Sholat Witr", SholatSunnah, "Sholat Sunnah Penutup Sholat Malam", "Min 1 Rakaat", 5),
        seed("11", "Sholat Dhuha", SholatSunnah, "Sholat Sunnah di waktu Dhuha", "Min 2 Rakaat", 5),
        seed("12", "Sholat Rawatib", SholatSunnah, "Sholat Sebelum dan Sesudah Shalat Fardhu", "10/12 Rakaat", 3),
        seed("13", "Sholat Subuh", SholatWajib, "Sholat Wajib di Waktu Fajar", "Wajib", 10),
        seed("14", "Sholat Dzuhur", SholatWajib, "Sholat Wajib di Waktu Siang", "Wajib", 10),
        seed("15", "Sholat Ashar", SholatWajib, "Sholat Wajib di Waktu Sore", "Wajib", 10),
        seed("16", "Sholat Maghrib", SholatWajib, "Sholat Wajib di Waktu Senja", "Wajib", 10),
        seed("17", "Sholat Isya", SholatWajib, "Sholat Wajib di Waktu Malam", "Wajib", 10),
        seed("18", "Tilawatil Al-Qur’an", TilawahAlQuran, "Membaca Al Qur’an", "1 Juz/Hari", 10),
    ]
}
