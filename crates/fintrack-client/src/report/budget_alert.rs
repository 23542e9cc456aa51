use tracing::{debug, info};

use crate::ClientResult;
use crate::model::{Budget, BudgetCategory, CategoryFilter, Period, from_cents, to_cents};
use crate::report::state::SettledTotal;
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq)]
pub struct OverBudget {
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub threshold: f64,
    pub total: f64,
    pub overage: f64,
}

/// Signals when the budget threshold is strictly below the total, compared
/// in whole cents.
pub fn evaluate(total: f64, budget: Option<&Budget>) -> Option<OverBudget> {
    let budget = budget?;
    let total_cents = to_cents(total);
    let threshold_cents = to_cents(budget.monthly_amount);
    if threshold_cents < total_cents {
        return Some(OverBudget {
            category: budget.category.clone(),
            month: budget.period.month(),
            year: budget.period.year(),
            threshold: from_cents(threshold_cents),
            total: from_cents(total_cents),
            overage: from_cents(total_cents - threshold_cents),
        });
    }
    None
}

/// Looks up the budget governing `filter` for the period and compares it
/// with a settled total. Zero totals and filters without a budget category
/// never reach the store.
pub fn check_budget(
    store: &dyn RecordStore,
    user_id: &str,
    period: Period,
    filter: &CategoryFilter,
    settled: SettledTotal,
) -> ClientResult<Option<OverBudget>> {
    let total = settled.amount();
    if total <= 0.0 {
        debug!(total, "skipping budget check for non-positive total");
        return Ok(None);
    }
    let Some(category) = BudgetCategory::for_filter(filter) else {
        debug!(filter = filter.as_str(), "no budget category for filter");
        return Ok(None);
    };

    let budgets = store.select_budgets(user_id, period, Some(category))?;
    let alert = evaluate(total, budgets.first());
    if let Some(event) = &alert {
        info!(
            category = %event.category,
            threshold = event.threshold,
            total = event.total,
            overage = event.overage,
            "budget exceeded"
        );
    }
    Ok(alert)
}
