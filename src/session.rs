//! Shared session context
//!
//! Holds the current token + user in memory and mirrors it to a JSON file
//! under the state directory, so a restarted process picks the session back
//! up (the localStorage role in the original client).
//!
//! The handle is an explicit, cloneable object passed to every component
//! that needs auth state; nothing in the crate reads session state from a
//! global.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::User;

const SESSION_FILE: &str = "session.json";

/// An authenticated session: token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    session: Option<Session>,
    /// Where to send the user after the next successful login
    return_url: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    return_url: Option<String>,
}

/// Cloneable handle to the shared session state
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
    /// Session file location; `None` for purely in-memory handles (tests)
    file_path: Option<PathBuf>,
}

impl SessionHandle {
    /// In-memory handle with no persistence. Used by tests and by callers
    /// that explicitly do not want a durable session.
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            file_path: None,
        }
    }

    /// Handle backed by `{state_dir}/session.json`, loading any session a
    /// previous run persisted.
    pub fn load(state_dir: impl AsRef<Path>) -> Self {
        let file_path = state_dir.as_ref().join(SESSION_FILE);
        let persisted = read_state_file(&file_path);
        if persisted.session.is_some() {
            debug!("restored persisted session from {}", file_path.display());
        }
        Self {
            state: Arc::new(RwLock::new(SessionState {
                session: persisted.session,
                return_url: persisted.return_url,
            })),
            file_path: Some(file_path),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().expect("session lock poisoned").session.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session lock poisoned")
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.state
            .read()
            .expect("session lock poisoned")
            .session
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// Install a new session (login / registration success) and persist it.
    pub fn set(&self, session: Session) {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.session = Some(session);
        }
        self.persist();
    }

    /// Drop the session (logout or forced logout on 401) and persist the
    /// cleared state.
    pub fn clear(&self) {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.session = None;
        }
        self.persist();
    }

    /// Remember where the user was headed, for post-login return.
    pub fn set_return_url(&self, url: impl Into<String>) {
        {
            let mut state = self.state.write().expect("session lock poisoned");
            state.return_url = Some(url.into());
        }
        self.persist();
    }

    /// Consume the stored post-login destination, if any.
    pub fn take_return_url(&self) -> Option<String> {
        let url = {
            let mut state = self.state.write().expect("session lock poisoned");
            state.return_url.take()
        };
        if url.is_some() {
            self.persist();
        }
        url
    }

    fn persist(&self) {
        let Some(path) = &self.file_path else {
            return;
        };
        let snapshot = {
            let state = self.state.read().expect("session lock poisoned");
            PersistedState {
                session: state.session.clone(),
                return_url: state.return_url.clone(),
            }
        };
        if let Err(e) = write_state_file(path, &snapshot) {
            // Losing persistence degrades to an in-memory session; not fatal.
            warn!("failed to persist session to {}: {}", path.display(), e);
        }
    }
}

fn read_state_file(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("session file {} is corrupt, ignoring: {}", path.display(), e);
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

fn write_state_file(path: &Path, state: &PersistedState) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| crate::error::AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    let text = serde_json::to_string_pretty(state)?;
    std::fs::write(path, text)
        .map_err(|e| crate::error::AppError::file_write_failed(path.display().to_string(), e))?;
    Ok(())
}
