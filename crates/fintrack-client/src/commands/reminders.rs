use std::path::Path;

use crate::ClientResult;
use crate::commands::common::resolve_user;
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{ReminderListData, ReminderRow};
use crate::store::RecordStore;
use crate::validate::{ReminderForm, validate_reminder};

#[derive(Debug, Default)]
pub struct ReminderSetOptions<'a> {
    pub form: ReminderForm,
    pub home_override: Option<&'a Path>,
}

pub fn set(options: ReminderSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "reminder set";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let new = validate_reminder(&options.form, user_id)?;
    let mut context = scope.open_store()?;
    let saved = context.store.insert_reminder(&new)?;
    success(COMMAND, ReminderRow::from(&saved))
}

pub fn list(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "reminder list";
    let scope = resolve_user(home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let context = scope.open_store()?;
    let rows = context.store.select_reminders(user_id)?;
    success(
        COMMAND,
        ReminderListData {
            rows: rows.iter().map(ReminderRow::from).collect(),
        },
    )
}
