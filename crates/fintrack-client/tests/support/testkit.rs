use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fintrack_client::commands::auth::{self, LoginOptions};
use fintrack_client::commands::budgets::{self, BudgetCreateOptions};
use fintrack_client::commands::reminders::{self, ReminderSetOptions};
use fintrack_client::commands::transactions::{self, ExpenseAddOptions};
use fintrack_client::validate::{BudgetForm, ExpenseForm, ReminderForm};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub const USER_ID: &str = "user-ada";

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("fintrack-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

pub fn sign_in(home: &Path, full_name: Option<&str>) {
    let result = auth::login(LoginOptions {
        user_id: USER_ID.to_string(),
        email: Some("ada@example.com".to_string()),
        full_name: full_name.map(str::to_string),
        username: Some("ada".to_string()),
        home_override: Some(home),
    });
    assert!(result.is_ok());
}

pub fn add_expense(home: &Path, name: &str, amount: &str, category: &str, on: &str) -> Value {
    let result = transactions::add_expense(ExpenseAddOptions {
        form: ExpenseForm {
            name: name.to_string(),
            amount: amount.to_string(),
            category: Some(category.to_string()),
            payment_method: Some("card".to_string()),
            date: Some(on.to_string()),
        },
        today: Some(date(on)),
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|envelope| envelope.data).unwrap_or(Value::Null)
}

pub fn create_budget(home: &Path, category: &str, amount: &str, month: u32, year: i32) {
    let result = budgets::create(BudgetCreateOptions {
        form: BudgetForm {
            name: format!("{category} budget"),
            monthly_amount: amount.to_string(),
            category: Some(category.to_string()),
        },
        month: Some(month),
        year: Some(year),
        today: None,
        home_override: Some(home),
    });
    assert!(result.is_ok());
}

pub fn set_reminder(home: &Path, name: &str, due_date: &str, days_before: i64) -> Value {
    let result = reminders::set(ReminderSetOptions {
        form: ReminderForm {
            name: name.to_string(),
            amount: "1200".to_string(),
            due_date: due_date.to_string(),
            days_before: Some(days_before),
        },
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|envelope| envelope.data).unwrap_or(Value::Null)
}
