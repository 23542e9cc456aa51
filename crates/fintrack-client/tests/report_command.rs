mod support;

use std::path::Path;

use fintrack_client::commands::report::{self, ReportOptions};
use fintrack_client::home::HomePaths;
use fintrack_client::model::TransactionKind;
use rusqlite::Connection;
use serde_json::Value;
use support::testkit::{USER_ID, add_expense, create_budget, date, sign_in, temp_home};

fn june_report(home: &Path, kind: TransactionKind, category: &str) -> Value {
    let result = report::run(ReportOptions {
        kind,
        category: Some(category.to_string()),
        month: Some(6),
        year: Some(2025),
        today: Some(date("2025-06-20")),
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|envelope| envelope.data).unwrap_or(Value::Null)
}

fn seed_june_food(home: &Path) {
    add_expense(home, "Groceries run", "30", "food", "2025-06-02");
    add_expense(home, "Lunch", "20", "food", "2025-06-01");
    add_expense(home, "Dinner", "10", "food", "2025-06-02");
    add_expense(home, "Bus pass", "40", "transport", "2025-06-03");
    add_expense(home, "Last month", "99", "food", "2025-05-31");
}

#[test]
fn food_report_groups_by_date_and_orders_chart_ascending() {
    let temp = temp_home("fintrack-report");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        seed_june_food(&home);

        let data = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(data["category"], "food");
        assert_eq!(data["record_count"], 3);
        assert_eq!(data["total"].as_f64(), Some(60.0));

        let chart = data["chart"].as_array().cloned().unwrap_or_default();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0]["date"], "2025-06-01");
        assert_eq!(chart[0]["amount"].as_f64(), Some(20.0));
        assert_eq!(chart[1]["date"], "2025-06-02");
        assert_eq!(chart[1]["amount"].as_f64(), Some(40.0));
        assert_eq!(chart[1]["relative_height"].as_f64(), Some(1.0));
        assert_eq!(chart[0]["relative_height"].as_f64(), Some(0.5));
    }
}

#[test]
fn all_filter_ranks_categories_by_total() {
    let temp = temp_home("fintrack-report-all");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        seed_june_food(&home);

        let data = june_report(&home, TransactionKind::Expense, "all");
        assert_eq!(data["category"], "all");
        assert_eq!(data["total"].as_f64(), Some(100.0));
        let categories = data["categories"].as_array().cloned().unwrap_or_default();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["category"], "food");
        assert_eq!(categories[0]["amount"].as_f64(), Some(60.0));
        assert_eq!(categories[1]["category"], "transport");
    }
}

#[test]
fn over_budget_total_raises_alert_with_overage() {
    let temp = temp_home("fintrack-report-over");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "food", "100", 6, 2025);
        add_expense(&home, "Market", "70", "food", "2025-06-04");
        add_expense(&home, "Bakery", "50", "food", "2025-06-09");

        let data = june_report(&home, TransactionKind::Expense, "food");
        let alert = &data["budget_alert"];
        assert_eq!(alert["category"], "food");
        assert_eq!(alert["threshold"].as_f64(), Some(100.0));
        assert_eq!(alert["total"].as_f64(), Some(120.0));
        assert_eq!(alert["overage"].as_f64(), Some(20.0));
        assert_eq!(alert["month"], 6);
        assert_eq!(alert["year"], 2025);
    }
}

#[test]
fn cent_sums_equal_to_the_budget_stay_silent() {
    let temp = temp_home("fintrack-report-cents");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "food", "0.30", 6, 2025);
        add_expense(&home, "Gum", "0.10", "food", "2025-06-04");
        add_expense(&home, "Mint", "0.20", "food", "2025-06-04");

        let data = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(data["total"].as_f64(), Some(0.3));
        assert_eq!(data["chart"][0]["amount"].as_f64(), Some(0.3));
        assert!(data["budget_alert"].is_null());

        add_expense(&home, "Toffee", "0.01", "food", "2025-06-05");
        let data = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(data["budget_alert"]["overage"].as_f64(), Some(0.01));
    }
}

#[test]
fn unreadable_budget_row_is_reported_next_to_the_report() {
    let temp = temp_home("fintrack-report-bad-budget");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        add_expense(&home, "Market", "70", "food", "2025-06-04");

        let db_path = HomePaths::resolve(Some(&home)).map(|paths| paths.store_db());
        assert!(db_path.is_ok());
        if let Ok(db_path) = db_path {
            let connection = Connection::open(db_path);
            assert!(connection.is_ok());
            if let Ok(connection) = connection {
                let planted = connection.execute(
                    "INSERT INTO budgets (id, user_id, name, category, monthly_amount, month, year, created_at)
                     VALUES ('bud_bad', ?1, 'Food', 'food', 'lots', 6, 2025, 'now')",
                    [USER_ID],
                );
                assert!(planted.is_ok());
            }
        }

        let data = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(data["total"].as_f64(), Some(70.0));
        assert!(data["budget_alert"].is_null());
        let notice = data["budget_check_error"].as_str().unwrap_or_default();
        assert!(notice.contains("`budgets`"));
    }
}

#[test]
fn totals_at_or_under_budget_stay_silent() {
    let temp = temp_home("fintrack-report-under");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "food", "100", 6, 2025);
        add_expense(&home, "Market", "80", "food", "2025-06-04");

        let under = june_report(&home, TransactionKind::Expense, "food");
        assert!(under["budget_alert"].is_null());

        add_expense(&home, "Snack", "20", "food", "2025-06-05");
        let exact = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(exact["total"].as_f64(), Some(100.0));
        assert!(exact["budget_alert"].is_null());
    }
}

#[test]
fn missing_budget_or_other_month_budget_never_alerts() {
    let temp = temp_home("fintrack-report-nobudget");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "food", "10", 7, 2025);
        add_expense(&home, "Market", "500", "food", "2025-06-04");

        let data = june_report(&home, TransactionKind::Expense, "food");
        assert_eq!(data["total"].as_f64(), Some(500.0));
        assert!(data["budget_alert"].is_null());
    }
}

#[test]
fn all_filter_checks_the_general_budget() {
    let temp = temp_home("fintrack-report-general");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "general", "50", 6, 2025);
        add_expense(&home, "Market", "30", "food", "2025-06-04");
        add_expense(&home, "Cinema", "25", "entertainment", "2025-06-05");

        let data = june_report(&home, TransactionKind::Expense, "all");
        assert_eq!(data["budget_alert"]["category"], "general");
        assert_eq!(data["budget_alert"]["overage"].as_f64(), Some(5.0));
    }
}

#[test]
fn income_reports_skip_the_budget_check() {
    let temp = temp_home("fintrack-report-income");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        create_budget(&home, "general", "1", 6, 2025);

        let data = june_report(&home, TransactionKind::Income, "all");
        assert_eq!(data["kind"], "income");
        assert_eq!(data["record_count"], 0);
        assert!(data["budget_alert"].is_null());
        assert_eq!(data["chart"].as_array().map(Vec::len), Some(0));
    }
}

#[test]
fn report_with_half_a_period_is_rejected() {
    let temp = temp_home("fintrack-report-period");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        sign_in(&home, None);
        let result = report::run(ReportOptions {
            month: Some(6),
            home_override: Some(&home),
            ..ReportOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}
