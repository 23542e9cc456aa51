use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, amount, key_value_rows, money, period_label, render_table, rows, terminal_width,
    text,
};

pub fn render_saved_transaction(data: &Value) -> io::Result<String> {
    let kind = text(data, "kind");
    let (tag_label, method_label) = if kind == "income" {
        ("Type", "Frequency")
    } else {
        ("Category", "Method")
    };

    let mut lines = vec![format!("Saved {kind} `{}`.", text(data, "name")), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Id", text(data, "id")),
            ("Amount", money(amount(data, "amount"))),
            (tag_label, text(data, "tag")),
            (method_label, text(data, "method")),
            ("Date", text(data, "date")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_transaction_list(data: &Value) -> io::Result<String> {
    let kind = text(data, "kind");
    let listed = rows(data, "rows");
    let mut lines = vec![format!("{} for {}", title_case(&kind), period_label(data))];
    lines.push(String::new());

    if listed.is_empty() {
        lines.push(format!("  No {kind} records this month."));
        return Ok(lines.join("\n"));
    }

    let tag_column = if kind == "income" { "Type" } else { "Category" };
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: tag_column,
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Id",
            align: Align::Left,
        },
    ];
    let table_rows = listed
        .iter()
        .map(|row| {
            vec![
                text(row, "date"),
                text(row, "name"),
                text(row, "tag"),
                money(amount(row, "amount")),
                text(row, "id"),
            ]
        })
        .collect::<Vec<_>>();
    lines.extend(render_table(&columns, &table_rows, terminal_width()));
    lines.push(String::new());
    lines.extend(key_value_rows(&[("Total", money(amount(data, "total")))], 2));
    Ok(lines.join("\n"))
}

pub fn render_removed(data: &Value) -> io::Result<String> {
    Ok(format!(
        "Removed `{}` from {}.",
        text(data, "id"),
        text(data, "table")
    ))
}

pub fn render_saved_debt(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("Saved debt `{}`.", text(data, "name")), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Id", text(data, "id")),
            ("Monthly", money(amount(data, "monthly_payment"))),
            ("Type", text(data, "debt_type")),
            ("Since", text(data, "start_date")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_debt_list(data: &Value) -> io::Result<String> {
    let listed = rows(data, "rows");
    if listed.is_empty() {
        return Ok("No debts recorded.".to_string());
    }

    let columns = [
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Monthly",
            align: Align::Right,
        },
        Column {
            name: "Since",
            align: Align::Left,
        },
    ];
    let table_rows = listed
        .iter()
        .map(|row| {
            vec![
                text(row, "name"),
                text(row, "debt_type"),
                money(amount(row, "monthly_payment")),
                text(row, "start_date"),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec!["Debts".to_string(), String::new()];
    lines.extend(render_table(&columns, &table_rows, terminal_width()));
    lines.push(String::new());
    lines.extend(key_value_rows(
        &[("Monthly total", money(amount(data, "monthly_total")))],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_saved_budget(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!(
            "Budget `{}` set for {} / {}.",
            text(data, "name"),
            text(data, "month"),
            text(data, "year")
        ),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Category", text(data, "category")),
            ("Limit", money(amount(data, "monthly_amount"))),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_budget_list(data: &Value) -> io::Result<String> {
    let listed = rows(data, "rows");
    let mut lines = vec![format!("Budgets for {}", period_label(data)), String::new()];
    if listed.is_empty() {
        lines.push("  No budgets this month.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Limit",
            align: Align::Right,
        },
    ];
    let table_rows = listed
        .iter()
        .map(|row| {
            vec![
                text(row, "category"),
                text(row, "name"),
                money(amount(row, "monthly_amount")),
            ]
        })
        .collect::<Vec<_>>();
    lines.extend(render_table(&columns, &table_rows, terminal_width()));
    Ok(lines.join("\n"))
}

pub fn render_saved_reminder(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!("Reminder `{}` scheduled.", text(data, "name")),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Amount", money(amount(data, "amount"))),
            ("Due", text(data, "due_date")),
            ("Alert on", text(data, "reminder_date")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_reminder_list(data: &Value) -> io::Result<String> {
    let listed = rows(data, "rows");
    if listed.is_empty() {
        return Ok("No reminders scheduled.".to_string());
    }

    let columns = [
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Due",
            align: Align::Left,
        },
        Column {
            name: "Alert on",
            align: Align::Left,
        },
    ];
    let table_rows = listed
        .iter()
        .map(|row| {
            vec![
                text(row, "name"),
                money(amount(row, "amount")),
                text(row, "due_date"),
                text(row, "reminder_date"),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec!["Reminders".to_string(), String::new()];
    lines.extend(render_table(&columns, &table_rows, terminal_width()));
    Ok(lines.join("\n"))
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
