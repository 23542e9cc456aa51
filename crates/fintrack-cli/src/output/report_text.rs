use std::cmp;
use std::io;

use serde_json::Value;

use super::format::{amount, bar, key_value_rows, money, period_label, rows, terminal_width, text};

const DATE_WIDTH: usize = 10;
const AMOUNT_WIDTH: usize = 12;

pub fn render_report(data: &Value) -> io::Result<String> {
    let kind = text(data, "kind");
    let mut lines = vec![
        format!("{} report for {}", kind, period_label(data)),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Category", text(data, "category")),
            ("Total", money(amount(data, "total"))),
            ("Records", text(data, "record_count")),
        ],
        2,
    ));

    if let Some(alert) = data.get("budget_alert").filter(|alert| !alert.is_null()) {
        lines.push(String::new());
        lines.push(render_budget_alert(alert));
    }
    if let Some(notice) = data.get("budget_check_error").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("Budget check skipped: {notice}"));
    }

    let chart = rows(data, "chart");
    lines.push(String::new());
    lines.push("Daily totals:".to_string());
    if chart.is_empty() {
        lines.push("  Nothing recorded for this filter.".to_string());
    } else {
        let bar_width = terminal_width()
            .saturating_sub(2 + DATE_WIDTH + 2 + AMOUNT_WIDTH + 2)
            .max(10);
        for point in &chart {
            lines.push(format!(
                "  {:<DATE_WIDTH$}  {:>AMOUNT_WIDTH$}  {}",
                text(point, "date"),
                money(amount(point, "amount")),
                bar(amount(point, "relative_height"), bar_width),
            ));
        }
    }

    let categories = rows(data, "categories");
    if !categories.is_empty() {
        lines.push(String::new());
        lines.push("By category:".to_string());
        let label_width = categories
            .iter()
            .map(|row| text(row, "category").chars().count())
            .fold(0, cmp::max);
        for row in &categories {
            lines.push(format!(
                "  {:<label_width$}  {:>AMOUNT_WIDTH$}",
                text(row, "category"),
                money(amount(row, "amount")),
            ));
        }
    }

    Ok(lines.join("\n"))
}

fn render_budget_alert(alert: &Value) -> String {
    format!(
        "Over budget: {} spending for {} / {} is {}, {} above the {} budget.",
        text(alert, "category"),
        text(alert, "month"),
        text(alert, "year"),
        money(amount(alert, "total")),
        money(amount(alert, "overage")),
        money(amount(alert, "threshold")),
    )
}

pub fn render_dashboard(data: &Value) -> io::Result<String> {
    let mut lines = vec![text(data, "greeting"), String::new()];

    if let Some(alert) = data.get("reminder_alert").filter(|alert| !alert.is_null()) {
        lines.push(format!(
            "Payment reminder: {} ({}) is due on {}.",
            text(alert, "name"),
            money(amount(alert, "amount")),
            text(alert, "due_date"),
        ));
        if alert.get("deleted").and_then(Value::as_bool) != Some(true) {
            lines.push(
                "  This reminder could not be cleared and may show again next time.".to_string(),
            );
        }
        lines.push(String::new());
    }

    let cards = rows(data, "cards");
    let title_width = cards
        .iter()
        .map(|card| text(card, "title").chars().count())
        .fold(0, cmp::max);
    lines.push("What would you like to do?".to_string());
    for card in &cards {
        lines.push(format!(
            "  {:<title_width$}  {}",
            text(card, "title"),
            text(card, "command"),
        ));
    }

    Ok(lines.join("\n"))
}
