use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::ClientResult;
use crate::commands::common::{resolve_user, today_or_local};
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{BudgetAlertData, CategoryTotalRow, ChartPointRow, ReportData};
use crate::date::{format_iso_date, resolve_period};
use crate::model::{CategoryFilter, TransactionKind};
use crate::report::{OverBudget, ReportState, check_budget};
use crate::store::RecordStore;

const COMMAND: &str = "report";

#[derive(Debug)]
pub struct ReportOptions<'a> {
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

impl Default for ReportOptions<'_> {
    fn default() -> Self {
        Self {
            kind: TransactionKind::Expense,
            category: None,
            month: None,
            year: None,
            today: None,
            home_override: None,
        }
    }
}

/// Fetch, aggregate, then check the budget, in that order. The budget check
/// only sees a total from a completed fetch and only applies to expenses.
pub fn run(options: ReportOptions<'_>) -> ClientResult<SuccessEnvelope> {
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
    let filter = CategoryFilter::parse(options.category.as_deref().unwrap_or("all"));
    let context = scope.open_store()?;

    let mut state = ReportState::new(filter);
    let ticket = state.begin_fetch();
    let rows = context
        .store
        .select_transactions(options.kind, user_id, period)?;
    let settled = state.complete_fetch(ticket, rows);

    let (budget_alert, budget_check_error) = match (options.kind, settled) {
        (TransactionKind::Expense, Some(total)) => {
            match check_budget(&context.store, user_id, period, state.filter(), total) {
                Ok(alert) => (alert, None),
                Err(error) => {
                    warn!(code = %error.code, %error, "budget lookup failed; report shown without alert");
                    (None, Some(error.message))
                }
            }
        }
        _ => (None, None),
    };

    let aggregation = state.aggregation();
    let data = ReportData {
        kind: options.kind.as_str().to_string(),
        period: period.into(),
        category: state.filter().as_str().to_string(),
        total: aggregation.total,
        record_count: state.transactions().len(),
        chart: aggregation
            .chart
            .iter()
            .map(|point| ChartPointRow {
                date: format_iso_date(&point.date),
                amount: point.amount,
                relative_height: aggregation.relative_height(point),
            })
            .collect(),
        categories: aggregation
            .categories
            .iter()
            .map(|total| CategoryTotalRow {
                category: total.category.clone(),
                amount: total.amount,
            })
            .collect(),
        budget_alert: budget_alert.map(alert_data),
        budget_check_error,
    };
    success(COMMAND, data)
}

fn alert_data(event: OverBudget) -> BudgetAlertData {
    BudgetAlertData {
        category: event.category,
        month: event.month,
        year: event.year,
        threshold: event.threshold,
        total: event.total,
        overage: event.overage,
    }
}
