use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::{resolve_user, today_or_local};
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{BudgetListData, BudgetRow};
use crate::date::resolve_period;
use crate::store::RecordStore;
use crate::validate::{BudgetForm, validate_budget};

/// Without `month`/`year` a budget applies to the month containing `today`.
#[derive(Debug, Default)]
pub struct BudgetCreateOptions<'a> {
    pub form: BudgetForm,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct BudgetListOptions<'a> {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn create(options: BudgetCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "budget create";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let period = resolve_period(
        options.month,
        options.year,
        today_or_local(options.today),
        COMMAND,
    )?;
    let new = validate_budget(&options.form, user_id, period)?;
    let mut context = scope.open_store()?;
    let saved = context.store.insert_budget(&new)?;
    success(COMMAND, BudgetRow::from(&saved))
}

pub fn list(options: BudgetListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "budget list";
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let period = resolve_period(
        options.month,
        options.year,
        today_or_local(options.today),
        COMMAND,
    )?;
    let context = scope.open_store()?;
    let rows = context.store.select_budgets(user_id, period, None)?;
    success(
        COMMAND,
        BudgetListData {
            period: period.into(),
            rows: rows.iter().map(BudgetRow::from).collect(),
        },
    )
}
