use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};
use tracing::debug;

use crate::home::HomePaths;
use crate::migrations::{EXPECTED_USER_VERSION, REQUIRED_TABLE_NAMES, run_pending};
use crate::session::FileSessionProvider;
use crate::store::SqliteStore;
use crate::{ClientError, ClientResult};

const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Everything a command needs: the migrated record store and the session source.
pub struct AppContext {
    pub paths: HomePaths,
    pub store: SqliteStore,
    pub sessions: FileSessionProvider,
}

pub fn ensure_initialized() -> ClientResult<AppContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<AppContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

pub fn ensure_initialized_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<AppContext> {
    open_store(HomePaths::resolve(home_override)?)
}

/// Creates the home if needed, then opens and migrates the record store.
pub fn open_store(paths: HomePaths) -> ClientResult<AppContext> {
    paths.create()?;

    let db_path = paths.store_db();
    let mut connection = Connection::open(&db_path).map_err(|error| open_error(&db_path, &error))?;
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(|error| open_error(&db_path, &error))?;
    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;
    verify_tables(&connection, &db_path)?;
    debug!(db_path = %db_path.display(), "record store ready");

    Ok(AppContext {
        sessions: paths.sessions(),
        store: SqliteStore::new(connection, &db_path),
        paths,
    })
}

/// Failures while opening or migrating the file, before any table is touched.
fn open_error(db_path: &Path, error: &SqliteError) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(db_path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(db_path)
        }
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly | ErrorCode::PermissionDenied) => {
            ClientError::store_init_permission_denied(db_path, &error.to_string())
        }
        _ => ClientError::store_init_failed(db_path, &error.to_string()),
    }
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = open_error(db_path, err);
            if mapped.code == "store_init_failed" {
                ClientError::migration_failed(db_path, &error.to_string())
            } else {
                mapped
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| open_error(db_path, &error))?;
    if version != EXPECTED_USER_VERSION {
        return Err(ClientError::migration_failed(
            db_path,
            &format!("expected schema version {EXPECTED_USER_VERSION}, found {version}"),
        ));
    }

    for table in REQUIRED_TABLE_NAMES {
        let present = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|error| open_error(db_path, &error))?;
        if present == 0 {
            return Err(ClientError::migration_failed(
                db_path,
                &format!("required table `{table}` is missing"),
            ));
        }
    }
    Ok(())
}
