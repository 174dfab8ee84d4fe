//! Per-day completion records and reflective notes.
//!
//! All records live under one persisted key as a date-keyed map. A record
//! for a date that was never written is materialized as a zero-value
//! default and only persisted on first mutation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::keys;
use crate::storage::kv::{read_json, write_json, KeyValueStore};

/// Fixed mood symbols, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mood {
    Sad,
    Worried,
    Neutral,
    Content,
    Joyful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Sad,
        Mood::Worried,
        Mood::Neutral,
        Mood::Content,
        Mood::Joyful,
    ];

    /// Wire encoding: the emoji stored in the log record.
    pub fn symbol(&self) -> &'static str {
        match self {
            Mood::Sad => "😢",
            Mood::Worried => "😟",
            Mood::Neutral => "😐",
            Mood::Content => "🙂",
            Mood::Joyful => "😄",
        }
    }

    /// Parse the wire symbol back into a mood.
    pub fn from_symbol(symbol: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.symbol() == symbol)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    /// Accepts the emoji symbol or an ASCII name (`sad` .. `joyful`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = match s.trim().to_lowercase().as_str() {
            "sad" => Some(Mood::Sad),
            "worried" => Some(Mood::Worried),
            "neutral" => Some(Mood::Neutral),
            "content" => Some(Mood::Content),
            "joyful" => Some(Mood::Joyful),
            _ => Mood::from_symbol(s.trim()),
        };
        name.ok_or_else(|| format!("unknown mood '{s}'"))
    }
}

/// Mood is stored as its symbol, with the empty string meaning unset.
mod mood_codec {
    use super::Mood;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mood: &Option<Mood>, s: S) -> Result<S::Ok, S::Error> {
        match mood {
            Some(m) => s.serialize_str(m.symbol()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Mood>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        Mood::from_symbol(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unknown mood symbol '{raw}'")))
    }
}

/// Last reading position in the Qur'an; both fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuranProgress {
    #[serde(default)]
    pub surah: String,
    #[serde(default)]
    pub ayat: String,
}

/// One calendar day's completion state and reflective notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Completed practice ids; unique, insertion order preserved.
    pub completed_ids: Vec<String>,
    #[serde(with = "mood_codec", default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub gratitude: String,
    #[serde(default)]
    pub hope: String,
    /// Derived cache: recomputed through the scoring engine on every
    /// mutation, never trusted across catalog changes.
    pub total_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quran_last_read: Option<QuranProgress>,
}

impl DailyLog {
    /// Zero-value record for a date with no stored data.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed_ids: Vec::new(),
            mood: None,
            reflection: String::new(),
            gratitude: String::new(),
            hope: String::new(),
            total_points: 0,
            quran_last_read: None,
        }
    }

    /// Whether the given practice is marked complete.
    pub fn is_completed(&self, practice_id: &str) -> bool {
        self.completed_ids.iter().any(|id| id == practice_id)
    }
}

/// Date-keyed map of all stored records.
pub type LogMap = BTreeMap<NaiveDate, DailyLog>;

/// Repository for daily log records.
///
/// `save` is a whole-map read-modify-write; concurrent writers race and
/// the later save wins (accepted single-writer contract).
pub struct LogRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> LogRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All stored records, keyed by date. Empty map if none persisted.
    pub fn get_all(&self) -> Result<LogMap> {
        Ok(read_json(self.store, keys::LOGS)?.unwrap_or_default())
    }

    /// The record for `date`, or a fresh zero-value record.
    ///
    /// The fresh record is not persisted until its first mutation.
    pub fn get(&self, date: NaiveDate) -> Result<DailyLog> {
        let logs = self.get_all()?;
        Ok(logs.get(&date).cloned().unwrap_or_else(|| DailyLog::empty(date)))
    }

    /// Upsert the record under its date key and persist the whole map.
    pub fn save(&self, log: &DailyLog) -> Result<()> {
        let mut logs = self.get_all()?;
        logs.insert(log.date, log.clone());
        write_json(self.store, keys::LOGS, &logs)?;
        tracing::debug!(date = %log.date, points = log.total_points, "saved daily log");
        Ok(())
    }
}
