//! Server-side session storage.
//!
//! Sessions live in process memory for the lifetime of the server: a map
//! from an opaque identifier (delivered to the client in a cookie) to the
//! authenticated user's id plus an expiry timestamp. Entries are written on
//! login, compared against the clock on every read, and dropped the first
//! time they are read after expiry. There is no logout operation; expiry is
//! the only way a session ends.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::AppError;

/// Name of the cookie carrying the opaque session identifier.
pub const SESSION_COOKIE: &str = "session_id";

/// What the store keeps per session: who the session belongs to and when it
/// stops being valid.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Shared handle to the in-memory session map.
///
/// Cheap to clone; all clones see the same sessions. Constructed once at
/// process start and handed to the login handler (which writes) and the
/// session gate (which reads).
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    /// Creates an empty store whose sessions expire `ttl` after issuance.
    /// The expiry is fixed at creation; reads never extend it.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The configured session lifetime, so the cookie's Max-Age can be kept
    /// in lockstep with the store.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a new session bound to `user_id` and returns its identifier.
    pub fn create(&self, user_id: i64) -> Result<String, AppError> {
        let session_id = Uuid::new_v4().simple().to_string();
        let record = SessionRecord {
            user_id,
            expires_at: Utc::now() + self.ttl,
        };

        self.sessions
            .write()
            .map_err(|_| AppError::internal("Session store unavailable", "lock poisoned"))?
            .insert(session_id.clone(), record);

        Ok(session_id)
    }

    /// Looks up a session id and returns the bound user id while the session
    /// is still live. An expired entry is removed here, on read, and reported
    /// exactly like an unknown id.
    pub fn resolve(&self, session_id: &str) -> Result<Option<i64>, AppError> {
        let now = Utc::now();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AppError::internal("Session store unavailable", "lock poisoned"))?;

        let found = sessions
            .get(session_id)
            .map(|record| (record.user_id, record.expires_at));

        match found {
            Some((user_id, expires_at)) if expires_at > now => Ok(Some(user_id)),
            Some(_) => {
                sessions.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Returns the number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if there are no sessions stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
