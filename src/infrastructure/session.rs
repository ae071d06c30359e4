// src/infrastructure/session.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::BoardState;
use crate::constants::{MAX_SESSIONS, SESSION_IDLE_SECS};
use crate::domain::Identity;

/// State kept for one browser between requests.
#[derive(Debug, Default)]
pub struct Session {
    pub identity: Option<Identity>,
    pub board: BoardState,
}

#[derive(Debug)]
struct Entry {
    session: Arc<AsyncMutex<Session>>,
    last_access: Instant,
}

/// In-memory browser sessions keyed by cookie value.
///
/// Each session sits behind its own async mutex, so one browser's requests
/// run one at a time while other browsers proceed. Sessions idle longer than
/// `idle` are dropped, and the least recently used go first once
/// `max_entries` is reached.
#[derive(Debug, Clone)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    max_entries: usize,
    idle: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(MAX_SESSIONS, Duration::from_secs(SESSION_IDLE_SECS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_entries: usize, idle: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_entries: max_entries.max(1),
            idle,
        }
    }

    /// Session for `id`, or a new empty one under a fresh id.
    ///
    /// Returns the id to put in the cookie.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, Arc<AsyncMutex<Session>>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(id) {
                if now.duration_since(entry.last_access) <= self.idle {
                    entry.last_access = now;
                    return (id.to_string(), entry.session.clone());
                }
                entries.remove(id);
            }
        }

        let session = Arc::new(AsyncMutex::new(Session::default()));
        let id = self.insert(&mut entries, session.clone(), now);
        (id, session)
    }

    /// Moves `session` under a fresh id and forgets `id`
    pub fn rotate(&self, id: &str, session: &Arc<AsyncMutex<Session>>) -> String {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(id);
        self.insert(&mut entries, session.clone(), Instant::now())
    }

    pub fn remove(&self, id: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(id);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(
        &self,
        entries: &mut HashMap<String, Entry>,
        session: Arc<AsyncMutex<Session>>,
        now: Instant,
    ) -> String {
        self.evict(entries, now);

        let id = Uuid::new_v4().to_string();
        entries.insert(
            id.clone(),
            Entry {
                session,
                last_access: now,
            },
        );
        id
    }

    /// Drops idle sessions, then the oldest ones until one slot is free
    fn evict(&self, entries: &mut HashMap<String, Entry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_access) <= self.idle);

        if entries.len() >= self.max_entries {
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(id, entry)| (id.clone(), entry.last_access))
                .collect();
            by_age.sort_by_key(|&(_, t)| t);
            let to_evict = entries.len() + 1 - self.max_entries;
            for (id, _) in by_age.into_iter().take(to_evict) {
                entries.remove(&id);
            }
        }

        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, remaining = entries.len(), "Evicted browser sessions");
        }
    }
}
