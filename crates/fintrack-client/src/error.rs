use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::FormIssue;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `fintrack {cmd} --help` for usage."),
            None => "Run `fintrack --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// Form submission was blocked locally; nothing reached the store.
    pub fn validation_failed(form: &str, issues: Vec<FormIssue>) -> Self {
        let count = issues.len();
        let noun = if count == 1 { "field needs" } else { "fields need" };
        Self::new(
            "validation_failed",
            &format!("The {form} form is incomplete: {count} {noun} fixing. Nothing was saved."),
            vec![
                "Fix the listed fields.".to_string(),
                format!("Run `fintrack {form} --help` to review accepted values."),
            ],
        )
        .with_data(json!({
            "form": form,
            "issues": issues,
        }))
    }

    pub fn record_not_found(table: &str, id: &str) -> Self {
        Self::new(
            "record_not_found",
            &format!("No {table} record with id `{id}` belongs to the current user."),
            vec![format!("Run `fintrack {table} list` to find a valid id.")],
        )
        .with_data(json!({
            "table": table,
            "id": id,
        }))
    }

    /// `action` is the store verb (`insert`, `select`, `delete`, `upsert`).
    pub fn store_failed(action: &str, table: &str, detail: &str) -> Self {
        let recovery = if action == "select" {
            "Retry the command; nothing was changed."
        } else {
            "Nothing was saved. Retry the command."
        };
        Self::new(
            "store_failed",
            &format!("The record store could not {action} `{table}` rows: {detail}"),
            vec![recovery.to_string()],
        )
        .with_data(json!({
            "table": table,
            "action": action,
        }))
    }

    pub fn store_row_invalid(table: &str, detail: &str) -> Self {
        Self::new(
            "store_row_invalid",
            &format!("A stored `{table}` row could not be read: {detail}"),
            vec![format!("Remove or repair the offending `{table}` row.")],
        )
        .with_data(json!({ "table": table }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot open the record store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `FINTRACK_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Record store is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Record store appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid database file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Record store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Record store initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn session_io(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "session_io_failed",
            &format!("Could not access the session file at `{location}`: {detail}"),
            vec!["Run `fintrack auth login <user-id>` to start a fresh session.".to_string()],
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "store_failed"
                    | "store_row_invalid"
                    | "store_init_permission_denied"
                    | "store_locked"
                    | "store_corrupt"
                    | "migration_failed"
                    | "store_init_failed"
                    | "session_io_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
