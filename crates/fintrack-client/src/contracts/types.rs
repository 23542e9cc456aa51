use serde::Serialize;

use crate::date::format_iso_date;
use crate::model::{Budget, Debt, Period, Reminder, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormIssue {
    pub field: String,
    pub code: String,
    pub description: String,
}

impl FormIssue {
    pub fn new(field: &str, code: &str, description: &str) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            description: description.to_string(),
        }
    }
}

/// Returned in place of command data when there is no signed-in user.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedData {
    pub skipped: bool,
    pub reason: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodData {
    pub month: u32,
    pub year: i32,
}

impl From<Period> for PeriodData {
    fn from(period: Period) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub amount: f64,
    pub tag: String,
    pub method: String,
    pub date: String,
    pub month: u32,
    pub year: i32,
    pub created_at: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(row: &Transaction) -> Self {
        let period = row.period();
        Self {
            id: row.id.clone(),
            kind: row.kind.as_str().to_string(),
            name: row.name.clone(),
            amount: row.amount,
            tag: row.tag.clone(),
            method: row.method.clone(),
            date: format_iso_date(&row.date),
            month: period.month(),
            year: period.year(),
            created_at: row.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub kind: String,
    pub period: PeriodData,
    pub total: f64,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovedData {
    pub table: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtRow {
    pub id: String,
    pub name: String,
    pub monthly_payment: f64,
    pub debt_type: String,
    pub start_date: String,
    pub created_at: String,
}

impl From<&Debt> for DebtRow {
    fn from(row: &Debt) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            monthly_payment: row.monthly_payment,
            debt_type: row.debt_type.clone(),
            start_date: format_iso_date(&row.start_date),
            created_at: row.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtListData {
    pub monthly_total: f64,
    pub rows: Vec<DebtRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub monthly_amount: f64,
    pub month: u32,
    pub year: i32,
    pub created_at: String,
}

impl From<&Budget> for BudgetRow {
    fn from(row: &Budget) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            category: row.category.clone(),
            monthly_amount: row.monthly_amount,
            month: row.period.month(),
            year: row.period.year(),
            created_at: row.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetListData {
    pub period: PeriodData,
    pub rows: Vec<BudgetRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderRow {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    pub days_before: i64,
    pub reminder_date: String,
    pub is_completed: bool,
    pub created_at: String,
}

impl From<&Reminder> for ReminderRow {
    fn from(row: &Reminder) -> Self {
        Self {
            id: row.id.clone(),
            name: row.name.clone(),
            amount: row.amount,
            due_date: format_iso_date(&row.due_date),
            days_before: row.days_before,
            reminder_date: format_iso_date(&row.reminder_date),
            is_completed: row.is_completed,
            created_at: row.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderListData {
    pub rows: Vec<ReminderRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPointRow {
    pub date: String,
    pub amount: f64,
    pub relative_height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotalRow {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetAlertData {
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub threshold: f64,
    pub total: f64,
    pub overage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub kind: String,
    pub period: PeriodData,
    pub category: String,
    pub total: f64,
    pub record_count: usize,
    pub chart: Vec<ChartPointRow>,
    pub categories: Vec<CategoryTotalRow>,
    pub budget_alert: Option<BudgetAlertData>,
    /// Set when the budget lookup failed; the report itself still stands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_check_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenCard {
    pub screen: String,
    pub title: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderAlertData {
    pub reminder_id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    pub trigger_date: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub greeting: String,
    pub today: String,
    pub cards: Vec<ScreenCard>,
    pub reminder_alert: Option<ReminderAlertData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    pub signed_in: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub started_at: Option<String>,
    pub last_active_at: Option<String>,
}
