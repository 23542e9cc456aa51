use std::path::Path;

use chrono::NaiveDate;

use crate::commands::common::{resolve_user, sum_amounts, today_or_local};
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{RemovedData, TransactionListData, TransactionRow};
use crate::date::resolve_period;
use crate::model::TransactionKind;
use crate::store::RecordStore;
use crate::validate::{ExpenseForm, IncomeForm, validate_expense, validate_income};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ExpenseAddOptions<'a> {
    pub form: ExpenseForm,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct IncomeAddOptions<'a> {
    pub form: IncomeForm,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug)]
pub struct ListOptions<'a> {
    pub kind: TransactionKind,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug)]
pub struct RemoveOptions<'a> {
    pub kind: TransactionKind,
    pub id: String,
    pub home_override: Option<&'a Path>,
}

pub fn add_expense(options: ExpenseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "expense add";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let new = validate_expense(&options.form, user_id, today_or_local(options.today))?;
    let mut context = scope.open_store()?;
    let saved = context.store.insert_transaction(&new)?;
    success(COMMAND, TransactionRow::from(&saved))
}

pub fn add_income(options: IncomeAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "income add";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let new = validate_income(&options.form, user_id, today_or_local(options.today))?;
    let mut context = scope.open_store()?;
    let saved = context.store.insert_transaction(&new)?;
    success(COMMAND, TransactionRow::from(&saved))
}

pub fn list(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} list", options.kind.as_str());
    let scope = resolve_user(options.home_override, &command)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(&command);
    };

    let period = resolve_period(
        options.month,
        options.year,
        today_or_local(options.today),
        &command,
    )?;
    let context = scope.open_store()?;
    let rows = context
        .store
        .select_transactions(options.kind, user_id, period)?;

    let data = TransactionListData {
        kind: options.kind.as_str().to_string(),
        period: period.into(),
        total: sum_amounts(rows.iter().map(|row| row.amount)),
        rows: rows.iter().map(TransactionRow::from).collect(),
    };
    success(&command, data)
}

pub fn remove(options: RemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} remove", options.kind.as_str());
    let id = options.id.trim();
    if id.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A record id is required.",
            Some(&command),
        ));
    }

    let scope = resolve_user(options.home_override, &command)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(&command);
    };

    let mut context = scope.open_store()?;
    if !context.store.delete_transaction(options.kind, user_id, id)? {
        return Err(ClientError::record_not_found(options.kind.as_str(), id));
    }
    success(
        &command,
        RemovedData {
            table: options.kind.table().to_string(),
            id: id.to_string(),
        },
    )
}
