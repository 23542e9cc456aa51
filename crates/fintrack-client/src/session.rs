use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::now_timestamp;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub started_at: String,
    #[serde(default)]
    pub last_active_at: Option<String>,
}

impl Session {
    pub fn start(user_id: &str, email: Option<&str>) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.map(str::to_string),
            started_at: now_timestamp(),
            last_active_at: None,
        }
    }
}

/// Source of the authenticated user. `Ok(None)` means nobody is signed in.
pub trait SessionProvider {
    fn current(&self) -> ClientResult<Option<Session>>;

    fn store(&self, session: &Session) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;
}

/// Keeps the session as JSON next to the record store.
#[derive(Debug, Clone)]
pub struct FileSessionProvider {
    path: PathBuf,
}

impl FileSessionProvider {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for FileSessionProvider {
    fn current(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ClientError::session_io(&self.path, &error.to_string())),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.user_id.trim().is_empty() => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn store(&self, session: &Session) -> ClientResult<()> {
        let body = serde_json::to_string_pretty(session)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        fs::write(&self.path, body)
            .map_err(|error| ClientError::session_io(&self.path, &error.to_string()))
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::session_io(&self.path, &error.to_string())),
        }
    }
}

/// Process-lifetime session hook. `start` runs once at startup and stamps
/// the session as active; there is no other registration.
#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    session: Option<Session>,
}

impl SessionLifecycle {
    pub fn start(provider: &dyn SessionProvider) -> ClientResult<Self> {
        let session = match provider.current()? {
            Some(mut session) => {
                session.last_active_at = Some(now_timestamp());
                provider.store(&session)?;
                debug!(user_id = %session.user_id, "session refreshed at startup");
                Some(session)
            }
            None => {
                debug!("no session at startup");
                None
            }
        };
        Ok(Self { session })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
