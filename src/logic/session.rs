//! User Session
//!
//! Demo login gate persisted as JSON. The access key is hardcoded - this is
//! a single-user demo, not a real auth boundary.

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants;

// ============================================================================
// CONSTANTS
// ============================================================================

/// The demo access key
pub const DEMO_ACCESS_KEY: &str = "1234";

/// Username used when the login form is left blank
const DEFAULT_USERNAME: &str = "Demo Patient";

const SESSION_FILE: &str = "session.json";

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    pub username: String,
    pub logged_in: bool,
}

#[derive(Debug, Clone)]
pub enum SessionError {
    /// Wrong access key
    InvalidAccessKey,
    StorageError(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAccessKey => write!(f, "Invalid access key"),
            Self::StorageError(e) => write!(f, "Session storage error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

// ============================================================================
// SESSION MANAGER
// ============================================================================

pub struct SessionManager {
    base_dir: PathBuf,
    current: Option<UserSession>,
}

impl SessionManager {
    /// Open a manager rooted at the given directory, restoring a persisted
    /// session when one exists.
    pub fn new(base_dir: PathBuf) -> Self {
        let current = load_session(&base_dir.join(SESSION_FILE));
        Self { base_dir, current }
    }

    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    /// Log in with the demo access key. An empty username defaults to
    /// "Demo Patient". The session is persisted on success.
    pub fn login(&mut self, username: &str, access_key: &str) -> Result<UserSession, SessionError> {
        if access_key != DEMO_ACCESS_KEY {
            return Err(SessionError::InvalidAccessKey);
        }

        let username = if username.trim().is_empty() {
            DEFAULT_USERNAME
        } else {
            username
        };

        let session = UserSession {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            logged_in: true,
        };

        fs::create_dir_all(&self.base_dir)
            .map_err(|e| SessionError::StorageError(e.to_string()))?;
        let json = serde_json::to_string_pretty(&session)
            .map_err(|e| SessionError::StorageError(e.to_string()))?;
        fs::write(self.base_dir.join(SESSION_FILE), json)
            .map_err(|e| SessionError::StorageError(e.to_string()))?;

        self.current = Some(session.clone());
        log::info!("User logged in: {}", session.username);
        Ok(session)
    }

    /// Log out and remove the persisted session.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            log::info!("User logged out: {}", session.username);
        }

        let path = self.base_dir.join(SESSION_FILE);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Failed to remove session file: {}", e);
            }
        }
    }
}

fn load_session(path: &PathBuf) -> Option<UserSession> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<UserSession>(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("Failed to parse session.json: {}", e);
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to read session.json: {}", e);
            None
        }
    }
}

// ============================================================================
// GLOBAL API
// ============================================================================

static MANAGER: Mutex<Option<SessionManager>> = Mutex::new(None);

/// Initialize the global session manager
pub fn init(base_dir: Option<PathBuf>) {
    let dir = base_dir.unwrap_or_else(constants::data_dir);
    *MANAGER.lock() = Some(SessionManager::new(dir));
}

/// Current session, if any
pub fn current() -> Option<UserSession> {
    MANAGER.lock().as_ref().and_then(|m| m.current().cloned())
}

/// Log in through the global manager
pub fn login(username: &str, access_key: &str) -> Result<UserSession, SessionError> {
    let mut guard = MANAGER.lock();
    match guard.as_mut() {
        Some(manager) => manager.login(username, access_key),
        None => Err(SessionError::StorageError(
            "session manager not initialized".to_string(),
        )),
    }
}

/// Log out through the global manager
pub fn logout() {
    if let Some(manager) = MANAGER.lock().as_mut() {
        manager.logout();
    }
}

// ============================================================================
// TESTS
// ============================================================================
