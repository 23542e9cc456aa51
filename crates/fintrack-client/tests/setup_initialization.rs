use std::fs;
use std::path::Path;

use fintrack_client::setup::ensure_initialized_at;
use fintrack_client::home::{HomePaths, home_error};
use rusqlite::Connection;
use tempfile::tempdir;

fn store_db_path(home: &Path) -> std::path::PathBuf {
    HomePaths::resolve(Some(home))
        .map(|paths| paths.store_db())
        .unwrap_or_else(|_| home.join("fintrack.db"))
}

fn object_exists(connection: &Connection, object_type: &str, object_name: &str) -> bool {
    connection
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [object_type, object_name],
            |row| row.get::<_, i64>(0),
        )
        .map(|count| count > 0)
        .unwrap_or(false)
}

fn user_version(connection: &Connection) -> Option<i64> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .ok()
}

#[test]
fn setup_creates_store_db_at_home_override() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("fintrack-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(context) = context {
            assert!(context.store.db_path().ends_with("fintrack.db"));
            assert_eq!(context.paths.root(), home.as_path());
            assert!(context.sessions.path().ends_with("session.json"));
            assert!(home.join("fintrack.db").exists());
        }
    }
}

#[test]
fn setup_is_idempotent_and_migrates_once() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("fintrack-home");

        assert!(ensure_initialized_at(&home).is_ok());
        assert!(ensure_initialized_at(&home).is_ok());

        let connection = Connection::open(store_db_path(&home));
        assert!(connection.is_ok());
        if let Ok(conn) = connection {
            assert_eq!(user_version(&conn), Some(1));
            for table in ["profiles", "expenses", "incomes", "debts", "budgets", "reminders"] {
                assert!(object_exists(&conn, "table", table), "missing {table}");
            }
            assert!(object_exists(
                &conn,
                "index",
                "idx_budgets_user_period_category"
            ));
        }
    }
}

#[test]
fn setup_reports_corrupt_store_file() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("fintrack-home");
        assert!(fs::create_dir_all(&home).is_ok());
        assert!(fs::write(store_db_path(&home), vec![0x42_u8; 4096]).is_ok());

        let context = ensure_initialized_at(&home);
        assert!(context.is_err());
        if let Err(error) = context {
            assert!(matches!(
                error.code.as_str(),
                "store_corrupt" | "migration_failed"
            ));
            assert!(error.is_internal());
        }
    }
}

#[test]
fn setup_rejects_home_that_is_a_file() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("not-a-dir");
        assert!(fs::write(&home, "plain file").is_ok());

        let context = ensure_initialized_at(&home);
        assert!(context.is_err());
        if let Err(error) = context {
            assert_eq!(error.code, "store_init_failed");
        }
    }
}

#[test]
fn permission_denied_io_maps_to_recoverable_code() {
    let error = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    let mapped = home_error(Path::new("/tmp/fintrack-home"), &error);
    assert_eq!(mapped.code, "store_init_permission_denied");
}
