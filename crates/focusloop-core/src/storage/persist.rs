//! Persistence port and write-behind wrapper.
//!
//! Every mutating operation produces at most one `persist` call. The write
//! is fire-and-forget: state is snapshotted, handed to a background task
//! when a tokio runtime is available (written inline otherwise), and a
//! failure is logged without touching in-memory state. There is no retry
//! queue.
//!
//! Each persisted entity carries a schema version and falls back to its
//! defaults - whole, never field-by-field - when it cannot be read back.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ledger::{AchievementSet, DailyGoal, DailyHistory, Stats};
use crate::timer::TimerSettings;

pub(crate) const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Versioned<T> {
    v: u32,
    data: T,
}

/// Encode an entity with its schema version.
pub(crate) fn encode<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Versioned {
        v: SCHEMA_VERSION,
        data,
    })
}

/// Decode an entity; `None` on parse failure or schema-version mismatch.
pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let versioned: Versioned<T> = serde_json::from_str(raw).ok()?;
    if versioned.v != SCHEMA_VERSION {
        return None;
    }
    Some(versioned.data)
}

/// All persisted ledger/clock state, one field per stored entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub settings: TimerSettings,
    pub stats: Stats,
    pub history: DailyHistory,
    pub achievements: AchievementSet,
    pub goal: DailyGoal,
}

/// Result of loading persisted state.
#[derive(Debug, Clone)]
pub struct LoadedState {
    pub snapshot: StateSnapshot,
    /// True when at least one present-but-unreadable entity was replaced by
    /// its defaults. A missing entity (fresh install) does not count.
    pub defaults_applied: bool,
}

/// Backing store for the persisted state.
pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<LoadedState, StoreError>;
    fn store(&self, snapshot: &StateSnapshot) -> Result<(), StoreError>;
}

/// Fire-and-forget wrapper around a [`StateStore`].
pub struct WriteBehind<S> {
    inner: Arc<S>,
}

impl<S: StateStore + 'static> WriteBehind<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    pub fn load(&self) -> Result<LoadedState, StoreError> {
        self.inner.load()
    }

    /// Persist a snapshot without blocking the caller. On a tokio runtime
    /// the write happens on a background task; otherwise it happens inline.
    /// Failures are logged and dropped.
    pub fn persist(&self, snapshot: &StateSnapshot) {
        let snapshot = snapshot.clone();
        let store = Arc::clone(&self.inner);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.store(&snapshot) {
                        tracing::warn!(error = %e, "state write failed");
                    }
                });
            }
            Err(_) => {
                if let Err(e) = store.store(&snapshot) {
                    tracing::warn!(error = %e, "state write failed");
                }
            }
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[derive(Default)]
struct MemoryInner {
    snapshot: Option<StateSnapshot>,
    writes: u64,
}

/// In-memory store, a stand-in for the database in tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing snapshot.
    pub fn with_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                snapshot: Some(snapshot),
                writes: 0,
            }),
        }
    }

    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    pub fn snapshot(&self) -> Option<StateSnapshot> {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<LoadedState, StoreError> {
        Ok(LoadedState {
            snapshot: self.lock().snapshot.clone().unwrap_or_default(),
            defaults_applied: false,
        })
    }

    fn store(&self, snapshot: &StateSnapshot) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.snapshot = Some(snapshot.clone());
        inner.writes += 1;
        Ok(())
    }
}
