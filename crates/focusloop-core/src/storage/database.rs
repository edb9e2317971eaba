//! SQLite-backed key-value state store.
//!
//! One JSON value per key, the persistent analog of the browser app this
//! tool grew out of. Keys:
//!
//! - `settings` - countdown durations and cycle cadence
//! - `stats` - total completions, last session date, current streak
//! - `daily_history` - date -> completion count
//! - `achievements` - achievement id -> unlock timestamp
//! - `daily_goal` - target and progress toward it

use std::sync::Mutex;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;

use super::persist::{decode, encode, LoadedState, StateSnapshot, StateStore};
use crate::error::StoreError;

const KEY_SETTINGS: &str = "settings";
const KEY_STATS: &str = "stats";
const KEY_HISTORY: &str = "daily_history";
const KEY_ACHIEVEMENTS: &str = "achievements";
const KEY_GOAL: &str = "daily_goal";

/// SQLite database holding the persisted session state.
pub struct StateDb {
    conn: Mutex<Connection>,
}

impl StateDb {
    /// Open the database at `~/.config/focusloop/focusloop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = super::data_dir()?.join("focusloop.db");
        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.lock()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// Get a raw value from the kv table.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace a raw value in the kv table.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Read one entity; a present-but-unreadable value falls back to the
    /// entity's defaults as a whole and flips the defaults flag.
    fn load_entity<T>(&self, key: &'static str, defaults_applied: &mut bool) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        match self.kv_get(key)? {
            None => Ok(T::default()),
            Some(raw) => match decode(&raw) {
                Some(value) => Ok(value),
                None => {
                    tracing::warn!(key, "unreadable persisted entity, falling back to defaults");
                    *defaults_applied = true;
                    Ok(T::default())
                }
            },
        }
    }

    fn store_entity<T: serde::Serialize>(&self, key: &'static str, data: &T) -> Result<(), StoreError> {
        let raw = encode(data).map_err(|source| StoreError::EncodeFailed { key, source })?;
        self.kv_set(key, &raw)
    }
}

impl StateStore for StateDb {
    fn load(&self) -> Result<LoadedState, StoreError> {
        let mut defaults_applied = false;
        let snapshot = StateSnapshot {
            settings: self.load_entity(KEY_SETTINGS, &mut defaults_applied)?,
            stats: self.load_entity(KEY_STATS, &mut defaults_applied)?,
            history: self.load_entity(KEY_HISTORY, &mut defaults_applied)?,
            achievements: self.load_entity(KEY_ACHIEVEMENTS, &mut defaults_applied)?,
            goal: self.load_entity(KEY_GOAL, &mut defaults_applied)?,
        };
        Ok(LoadedState {
            snapshot,
            defaults_applied,
        })
    }

    fn store(&self, snapshot: &StateSnapshot) -> Result<(), StoreError> {
        self.store_entity(KEY_SETTINGS, &snapshot.settings)?;
        self.store_entity(KEY_STATS, &snapshot.stats)?;
        self.store_entity(KEY_HISTORY, &snapshot.history)?;
        self.store_entity(KEY_ACHIEVEMENTS, &snapshot.achievements)?;
        self.store_entity(KEY_GOAL, &snapshot.goal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn kv_roundtrip() {
        let db = StateDb::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);
        db.kv_set("k", "v1").unwrap();
        db.kv_set("k", "v2").unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn fresh_database_loads_defaults_without_notice() {
        let db = StateDb::open_memory().unwrap();
        let loaded = db.load().unwrap();
        assert!(!loaded.defaults_applied);
        assert_eq!(loaded.snapshot.settings.work_minutes, 25);
        assert_eq!(loaded.snapshot.goal.target, 8);
        assert!(loaded.snapshot.history.is_empty());
    }

    #[test]
    fn snapshot_roundtrip() {
        let db = StateDb::open_memory().unwrap();
        let mut snapshot = StateSnapshot::default();
        snapshot.stats.total_completions = 42;
        snapshot.stats.current_streak = 3;
        snapshot
            .history
            .record(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        snapshot.goal.target = 6;
        db.store(&snapshot).unwrap();

        let loaded = db.load().unwrap();
        assert!(!loaded.defaults_applied);
        assert_eq!(loaded.snapshot.stats.total_completions, 42);
        assert_eq!(
            loaded
                .snapshot
                .history
                .count(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
            1
        );
        assert_eq!(loaded.snapshot.goal.target, 6);
    }

    #[test]
    fn corrupt_entity_falls_back_whole_with_notice() {
        let db = StateDb::open_memory().unwrap();
        let mut snapshot = StateSnapshot::default();
        snapshot.stats.total_completions = 42;
        db.store(&snapshot).unwrap();

        db.kv_set(KEY_STATS, "{definitely not json").unwrap();
        let loaded = db.load().unwrap();
        assert!(loaded.defaults_applied);
        // The corrupt entity reverts entirely...
        assert_eq!(loaded.snapshot.stats.total_completions, 0);
        // ...while intact entities are untouched.
        assert_eq!(loaded.snapshot.settings.work_minutes, 25);
    }
}
