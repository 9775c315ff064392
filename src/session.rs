//! Per-visitor session state.
//!
//! Sessions live in memory and are keyed by a random id carried in the
//! `vibecheck_session` cookie. A session idle for longer than
//! [`SESSION_IDLE_MINUTES`] is dropped. The store belongs to
//! the application state; handlers reach it through the [`VisitorSession`]
//! extractor.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::{server::AppState, types::Token, utils, warning};

pub const COOKIE_SESSION_KEY: &str = "vibecheck_session";

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Identifier the visitor typed on the entry page.
    pub user_id: Option<String>,
    /// Anti-forgery token of the pending authorization flow.
    pub auth_state: Option<String>,
    pub token: Option<Token>,
}

/// How long a session survives without any request.
pub const SESSION_IDLE_MINUTES: i64 = 60;

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_access: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::minutes(SESSION_IDLE_MINUTES))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Returns a copy of the session, or an empty one if none exists or it
    /// went idle for too long.
    pub async fn get(&self, id: &str) -> Session {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let expired = match sessions.get(id) {
            Some(entry) => self.is_expired(entry, now),
            None => return Session::default(),
        };
        if expired {
            sessions.remove(id);
            return Session::default();
        }

        match sessions.get_mut(id) {
            Some(entry) => {
                entry.last_access = now;
                entry.session.clone()
            }
            None => Session::default(),
        }
    }

    /// Mutates the session, creating it if needed. Expired sessions of all
    /// visitors are dropped first.
    pub async fn update<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, entry| !self.is_expired(entry, now));

        let entry = sessions.entry(id.to_string()).or_insert_with(|| SessionEntry {
            session: Session::default(),
            last_access: now,
        });
        entry.last_access = now;
        f(&mut entry.session)
    }

    pub async fn clear(&self, id: &str) {
        self.sessions.lock().await.remove(id);
    }

    pub async fn contains(&self, id: &str) -> bool {
        let now = Utc::now();
        self.sessions
            .lock()
            .await
            .get(id)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        entry.last_access + self.idle_timeout <= now
    }
}

/// Session of the visitor making the current request.
///
/// Extracting it never fails for a visitor without a cookie: a new id is
/// minted, and [`VisitorSession::cookies`] carries it back to the browser.
pub struct VisitorSession {
    id: String,
    store: Arc<SessionStore>,
    jar: CookieJar,
}

impl VisitorSession {
    pub fn new(id: String, store: Arc<SessionStore>, jar: CookieJar) -> Self {
        Self { id, store, jar }
    }

    pub async fn get(&self) -> Session {
        self.store.get(&self.id).await
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        self.store.update(&self.id, f).await
    }

    pub async fn clear(&self) {
        self.store.clear(&self.id).await
    }

    /// Cookie jar to return with the response so the browser keeps the id.
    pub fn cookies(&self) -> CookieJar {
        let cookie = Cookie::build((COOKIE_SESSION_KEY, self.id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        self.jar.clone().add(cookie)
    }
}

impl<S> FromRequestParts<S> for VisitorSession
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(app) = parts.extensions.get::<AppState>() else {
            warning!("Application state missing from request extensions");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        };

        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar
            .get(COOKIE_SESSION_KEY)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(utils::generate_session_id);

        Ok(Self::new(id, Arc::clone(&app.sessions), jar))
    }
}
