//! In-memory session store keyed by random ids.

use chrono::{DateTime, Duration, Utc};
use ravens_core::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::session::Session;

#[derive(Debug, Clone)]
struct StoredSession {
    values: Map<String, Value>,
    expires_at: DateTime<Utc>,
}

impl StoredSession {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Sessions for every visitor, forgotten after `idle_timeout` without a
/// request.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, StoredSession>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// A store forgetting sessions after `minutes` idle. The timeout must be
    /// positive and representable as a `chrono::Duration`.
    pub fn with_idle_minutes(minutes: i64) -> Result<Self> {
        let idle_timeout = Duration::try_minutes(minutes)
            .filter(|timeout| *timeout > Duration::zero())
            .ok_or_else(|| {
                Error::Config(format!(
                    "session idle timeout must be a positive number of minutes, got {minutes}"
                ))
            })?;
        Ok(Self::new(idle_timeout))
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.idle_timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// The visitor's session, or a blank one if `id` is unknown or expired.
    pub async fn load(&self, id: Option<&str>) -> Session {
        let Some(id) = id else {
            return Session::new();
        };

        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(id) {
                Some(stored) if stored.is_live(now) => {
                    return Session::restore(id.to_string(), stored.values.clone());
                }
                Some(_) => {}
                None => return Session::new(),
            }
        }

        tracing::debug!("Session expired, starting afresh");
        self.entries.write().await.remove(id);
        Session::new()
    }

    /// Write the session back.
    ///
    /// Returns the new id when the session was stored for the first time and
    /// the visitor needs a cookie. Blank sessions are never stored.
    pub async fn commit(&self, session: Session) -> Option<String> {
        let (id, values, changed) = session.into_parts();
        let expires_at = self.expiry_from(Utc::now());
        let mut entries = self.entries.write().await;

        if !changed {
            if let Some(stored) = id.as_deref().and_then(|id| entries.get_mut(id)) {
                stored.expires_at = expires_at;
            }
            return None;
        }

        if values.is_empty() {
            return None;
        }

        match id {
            Some(id) => {
                entries.insert(id, StoredSession { values, expires_at });
                None
            }
            None => {
                let id = generate_session_id();
                entries.insert(id.clone(), StoredSession { values, expires_at });
                Some(id)
            }
        }
    }

    /// Drop expired sessions, returning how many went.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.is_live(now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::minutes(120))
    }
}

/// Generate a random session id
fn generate_session_id() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}
