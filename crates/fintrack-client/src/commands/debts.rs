use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::{resolve_user, sum_amounts, today_or_local};
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{DebtListData, DebtRow};
use crate::store::RecordStore;
use crate::validate::{DebtForm, validate_debt};

#[derive(Debug, Default)]
pub struct DebtAddOptions<'a> {
    pub form: DebtForm,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn add(options: DebtAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "debt add";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let new = validate_debt(&options.form, user_id, today_or_local(options.today))?;
    let mut context = scope.open_store()?;
    let saved = context.store.insert_debt(&new)?;
    success(COMMAND, DebtRow::from(&saved))
}

pub fn list(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "debt list";
    let scope = resolve_user(home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let context = scope.open_store()?;
    let rows = context.store.select_debts(user_id)?;
    success(
        COMMAND,
        DebtListData {
            monthly_total: sum_amounts(rows.iter().map(|row| row.monthly_payment)),
            rows: rows.iter().map(DebtRow::from).collect(),
        },
    )
}
