//! The fintrack home directory: the record store file and the session file
//! live side by side under one root, resolved once per command.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::session::FileSessionProvider;
use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "FINTRACK_HOME";

const DEFAULT_DIR_NAME: &str = ".fintrack";
const STORE_FILE_NAME: &str = "fintrack.db";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePaths {
    root: PathBuf,
}

impl HomePaths {
    /// `--home` wins over `FINTRACK_HOME`, which wins over `~/.fintrack`.
    /// Relative roots are anchored at the working directory.
    pub fn resolve(home_override: Option<&Path>) -> ClientResult<Self> {
        let root = match home_override {
            Some(path) => path.to_path_buf(),
            None => default_root()?,
        };
        if root.is_absolute() {
            return Ok(Self { root });
        }
        let cwd = std::env::current_dir().map_err(|error| home_error(&root, &error))?;
        Ok(Self {
            root: cwd.join(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_db(&self) -> PathBuf {
        self.root.join(STORE_FILE_NAME)
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join(SESSION_FILE_NAME)
    }

    pub fn sessions(&self) -> FileSessionProvider {
        FileSessionProvider::new(&self.session_file())
    }

    /// Only writers call this; reading a session never creates the directory.
    pub fn create(&self) -> ClientResult<()> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(ClientError::store_init_failed(
                &self.root,
                "the fintrack home exists but is not a directory",
            ));
        }
        fs::create_dir_all(&self.root).map_err(|error| home_error(&self.root, &error))?;
        restrict_to_owner(&self.root);
        Ok(())
    }
}

fn default_root() -> ClientResult<PathBuf> {
    if let Some(value) = std::env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    home::home_dir()
        .map(|dir| dir.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| {
            ClientError::store_init_failed(
                Path::new(DEFAULT_DIR_NAME),
                &format!("no user home directory; set `{HOME_ENV_VAR}` or pass `--home`"),
            )
        })
}

pub fn home_error(path: &Path, error: &std::io::Error) -> ClientError {
    match error.kind() {
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) {}
