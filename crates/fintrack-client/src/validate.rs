//! Form validators. Each form keeps the raw text a user typed; validation
//! collects every issue before rejecting so a single round trip reports all
//! fields that need fixing. A rejected form never reaches the store.

use chrono::NaiveDate;

use crate::contracts::types::FormIssue;
use crate::date::{days_before, parse_stored_date};
use crate::model::{
    BudgetCategory, DebtType, ExpenseCategory, IncomeFrequency, IncomeType, LeadTime, NewBudget,
    NewDebt, NewReminder, NewTransaction, PaymentMethod, Period, TransactionKind,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IncomeForm {
    pub name: String,
    pub amount: String,
    pub income_type: Option<String>,
    pub frequency: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DebtForm {
    pub name: String,
    pub monthly_payment: String,
    pub debt_type: Option<String>,
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    pub name: String,
    pub monthly_amount: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReminderForm {
    pub name: String,
    pub amount: String,
    pub due_date: String,
    pub days_before: Option<i64>,
}

pub fn validate_expense(
    form: &ExpenseForm,
    user_id: &str,
    today: NaiveDate,
) -> ClientResult<NewTransaction> {
    let mut issues = Vec::new();
    let name = validate_name(&form.name, &mut issues);
    let amount = validate_amount("amount", &form.amount, &mut issues);
    let category = validate_choice(
        "category",
        form.category.as_deref(),
        ExpenseCategory::Food,
        ExpenseCategory::parse,
        &ExpenseCategory::ALL.map(ExpenseCategory::as_str),
        &mut issues,
    );
    let method = validate_choice(
        "payment_method",
        form.payment_method.as_deref(),
        PaymentMethod::Card,
        PaymentMethod::parse,
        &PaymentMethod::ALL.map(PaymentMethod::as_str),
        &mut issues,
    );
    let date = validate_date("date", form.date.as_deref(), today, &mut issues);

    match (name, amount, category, method, date) {
        (Some(name), Some(amount), Some(category), Some(method), Some(date)) if issues.is_empty() => {
            Ok(NewTransaction {
                user_id: user_id.to_string(),
                kind: TransactionKind::Expense,
                name,
                amount,
                tag: category.as_str().to_string(),
                method: method.as_str().to_string(),
                date,
            })
        }
        _ => Err(ClientError::validation_failed("expense add", issues)),
    }
}

pub fn validate_income(
    form: &IncomeForm,
    user_id: &str,
    today: NaiveDate,
) -> ClientResult<NewTransaction> {
    let mut issues = Vec::new();
    let name = validate_name(&form.name, &mut issues);
    let amount = validate_amount("amount", &form.amount, &mut issues);
    let income_type = validate_choice(
        "type",
        form.income_type.as_deref(),
        IncomeType::Salary,
        IncomeType::parse,
        &IncomeType::ALL.map(IncomeType::as_str),
        &mut issues,
    );
    let frequency = validate_choice(
        "frequency",
        form.frequency.as_deref(),
        IncomeFrequency::Monthly,
        IncomeFrequency::parse,
        &IncomeFrequency::ALL.map(IncomeFrequency::as_str),
        &mut issues,
    );
    let date = validate_date("date", form.date.as_deref(), today, &mut issues);

    match (name, amount, income_type, frequency, date) {
        (Some(name), Some(amount), Some(income_type), Some(frequency), Some(date))
            if issues.is_empty() =>
        {
            Ok(NewTransaction {
                user_id: user_id.to_string(),
                kind: TransactionKind::Income,
                name,
                amount,
                tag: income_type.as_str().to_string(),
                method: frequency.as_str().to_string(),
                date,
            })
        }
        _ => Err(ClientError::validation_failed("income add", issues)),
    }
}

pub fn validate_debt(form: &DebtForm, user_id: &str, today: NaiveDate) -> ClientResult<NewDebt> {
    let mut issues = Vec::new();
    let name = validate_name(&form.name, &mut issues);
    let monthly_payment = validate_amount("amount", &form.monthly_payment, &mut issues);
    let debt_type = validate_choice(
        "type",
        form.debt_type.as_deref(),
        DebtType::CreditCard,
        DebtType::parse,
        &DebtType::ALL.map(DebtType::as_str),
        &mut issues,
    );
    let start_date = validate_date("start_date", form.start_date.as_deref(), today, &mut issues);

    match (name, monthly_payment, debt_type, start_date) {
        (Some(name), Some(monthly_payment), Some(debt_type), Some(start_date))
            if issues.is_empty() =>
        {
            Ok(NewDebt {
                user_id: user_id.to_string(),
                name,
                monthly_payment,
                debt_type,
                start_date,
            })
        }
        _ => Err(ClientError::validation_failed("debt add", issues)),
    }
}

pub fn validate_budget(form: &BudgetForm, user_id: &str, period: Period) -> ClientResult<NewBudget> {
    let mut issues = Vec::new();
    let name = validate_name(&form.name, &mut issues);
    let monthly_amount = validate_amount("amount", &form.monthly_amount, &mut issues);
    let allowed = budget_category_tags();
    let category = validate_choice(
        "category",
        form.category.as_deref(),
        BudgetCategory::General,
        BudgetCategory::parse,
        &allowed,
        &mut issues,
    );

    match (name, monthly_amount, category) {
        (Some(name), Some(monthly_amount), Some(category)) if issues.is_empty() => Ok(NewBudget {
            user_id: user_id.to_string(),
            name,
            category,
            monthly_amount,
            period,
        }),
        _ => Err(ClientError::validation_failed("budget create", issues)),
    }
}

pub fn validate_reminder(form: &ReminderForm, user_id: &str) -> ClientResult<NewReminder> {
    let mut issues = Vec::new();
    let name = validate_name(&form.name, &mut issues);
    let amount = validate_amount("amount", &form.amount, &mut issues);
    let due_date = parse_required_date("due_date", &form.due_date, &mut issues);
    let lead_time = match form.days_before {
        None => Some(LeadTime::OneDay),
        Some(days) => {
            let parsed = LeadTime::from_days(days);
            if parsed.is_none() {
                issues.push(FormIssue::new(
                    "days_before",
                    "invalid_choice",
                    "days_before must be one of: 1, 5, 7, 14, 30.",
                ));
            }
            parsed
        }
    };

    match (name, amount, due_date, lead_time) {
        (Some(name), Some(amount), Some(due_date), Some(lead_time)) if issues.is_empty() => {
            Ok(NewReminder {
                user_id: user_id.to_string(),
                name,
                amount,
                due_date,
                lead_time,
            })
        }
        _ => Err(ClientError::validation_failed("reminder set", issues)),
    }
}

/// The date at or after which a reminder becomes due for alerting.
pub fn reminder_trigger_date(due_date: NaiveDate, days_before_due: i64) -> NaiveDate {
    days_before(due_date, days_before_due)
}

fn budget_category_tags() -> Vec<&'static str> {
    let mut tags = vec![BudgetCategory::GENERAL_TAG];
    tags.extend(
        ExpenseCategory::ALL
            .iter()
            .filter(|category| **category != ExpenseCategory::Other)
            .map(|category| category.as_str()),
    );
    tags
}

fn validate_name(value: &str, issues: &mut Vec<FormIssue>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(FormIssue::new(
            "name",
            "missing_required_field",
            "name must be present and non-empty.",
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn validate_amount(field: &str, value: &str, issues: &mut Vec<FormIssue>) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(FormIssue::new(
            field,
            "missing_required_field",
            &format!("{field} must be present."),
        ));
        return None;
    }

    let parsed = if is_plain_decimal(trimmed) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    };
    let Some(parsed) = parsed else {
        issues.push(FormIssue::new(
            field,
            "invalid_amount",
            &format!("{field} must be a number like 12.50, got `{trimmed}`."),
        ));
        return None;
    };

    if !parsed.is_finite() {
        issues.push(FormIssue::new(
            field,
            "invalid_amount",
            &format!("{field} must be a finite number."),
        ));
        return None;
    }
    if parsed < 0.0 {
        issues.push(FormIssue::new(
            field,
            "negative_amount",
            &format!("{field} must not be negative."),
        ));
        return None;
    }
    if parsed == 0.0 {
        issues.push(FormIssue::new(
            field,
            "zero_amount",
            &format!("{field} must be greater than 0.00."),
        ));
        return None;
    }
    if decimal_places(trimmed) > 2 {
        issues.push(FormIssue::new(
            field,
            "too_many_decimals",
            &format!("{field} must use at most 2 decimal places."),
        ));
        return None;
    }

    Some(parsed)
}

/// Digits with an optional sign and fractional part. Exponents, `inf` and
/// `NaN` are not amounts even though `f64` parses them.
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}

fn decimal_places(value: &str) -> usize {
    value
        .split_once('.')
        .map(|(_, fraction)| fraction.trim_end_matches('0').len())
        .unwrap_or(0)
}

fn validate_choice<T: Copy>(
    field: &str,
    value: Option<&str>,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
    allowed: &[&str],
    issues: &mut Vec<FormIssue>,
) -> Option<T> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Some(default);
    };
    let parsed = parse(raw);
    if parsed.is_none() {
        issues.push(FormIssue::new(
            field,
            "invalid_choice",
            &format!("{field} must be one of: {}.", allowed.join(", ")),
        ));
    }
    parsed
}

fn validate_date(
    field: &str,
    value: Option<&str>,
    today: NaiveDate,
    issues: &mut Vec<FormIssue>,
) -> Option<NaiveDate> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Some(today),
        Some(raw) => parse_required_date(field, raw, issues),
    }
}

fn parse_required_date(field: &str, value: &str, issues: &mut Vec<FormIssue>) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(FormIssue::new(
            field,
            "missing_required_field",
            &format!("{field} must be present."),
        ));
        return None;
    }
    let parsed = parse_stored_date(trimmed);
    if parsed.is_none() {
        issues.push(FormIssue::new(
            field,
            "invalid_date",
            &format!("{field} must use YYYY-MM-DD format with a real calendar date."),
        ));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        BudgetForm, ExpenseForm, ReminderForm, reminder_trigger_date, validate_budget,
        validate_expense, validate_reminder,
    };
    use crate::model::{BudgetCategory, LeadTime, Period, TransactionKind};

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap_or_default()
    }

    fn issue_codes(result: &crate::ClientError) -> Vec<String> {
        result
            .data
            .as_ref()
            .and_then(|data| data.get("issues"))
            .and_then(serde_json::Value::as_array)
            .map(|issues| {
                issues
                    .iter()
                    .filter_map(|issue| issue.get("code").and_then(serde_json::Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn expense_defaults_category_method_and_date() {
        let form = ExpenseForm {
            name: "  Lunch ".to_string(),
            amount: "12.50".to_string(),
            ..ExpenseForm::default()
        };
        let result = validate_expense(&form, "user_1", june(5));
        assert!(result.is_ok());
        if let Ok(expense) = result {
            assert_eq!(expense.kind, TransactionKind::Expense);
            assert_eq!(expense.name, "Lunch");
            assert_eq!(expense.tag, "food");
            assert_eq!(expense.method, "card");
            assert_eq!(expense.date, june(5));
        }
    }

    #[test]
    fn zero_amount_and_blank_name_are_both_reported() {
        let form = ExpenseForm {
            name: "   ".to_string(),
            amount: "0.00".to_string(),
            ..ExpenseForm::default()
        };
        let result = validate_expense(&form, "user_1", june(5));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "validation_failed");
            assert_eq!(issue_codes(&error), vec!["missing_required_field", "zero_amount"]);
        }
    }

    #[test]
    fn amount_rejects_text_negatives_infinities_and_fractions_of_cents() {
        for (raw, code) in [
            ("abc", "invalid_amount"),
            ("-4", "negative_amount"),
            ("inf", "invalid_amount"),
            ("1.005", "too_many_decimals"),
            ("1e-5", "invalid_amount"),
            ("2E2", "invalid_amount"),
            ("NaN", "invalid_amount"),
            (".", "invalid_amount"),
            ("", "missing_required_field"),
        ] {
            let form = ExpenseForm {
                name: "Coffee".to_string(),
                amount: raw.to_string(),
                ..ExpenseForm::default()
            };
            let result = validate_expense(&form, "user_1", june(5));
            assert!(result.is_err(), "amount `{raw}` should be rejected");
            if let Err(error) = result {
                assert_eq!(issue_codes(&error), vec![code.to_string()]);
            }
        }
    }

    #[test]
    fn plain_decimals_with_bare_fractions_are_accepted() {
        for raw in ["7", "7.", ".5", "12.50", "3.10"] {
            let form = ExpenseForm {
                name: "Coffee".to_string(),
                amount: raw.to_string(),
                ..ExpenseForm::default()
            };
            assert!(
                validate_expense(&form, "user_1", june(5)).is_ok(),
                "amount `{raw}` should be accepted"
            );
        }
    }

    #[test]
    fn unknown_category_lists_allowed_values() {
        let form = ExpenseForm {
            name: "Coffee".to_string(),
            amount: "3".to_string(),
            category: Some("coffee".to_string()),
            ..ExpenseForm::default()
        };
        let result = validate_expense(&form, "user_1", june(5));
        assert!(result.is_err());
        if let Err(error) = result {
            let described = error.data.map(|data| data.to_string()).unwrap_or_default();
            assert!(described.contains("food, transport"));
        }
    }

    #[test]
    fn budget_accepts_general_sentinel_but_not_other() {
        let period = Period::new(6, 2025);
        assert!(period.is_ok());
        if let Ok(period) = period {
            let general = validate_budget(
                &BudgetForm {
                    name: "June".to_string(),
                    monthly_amount: "400".to_string(),
                    category: None,
                },
                "user_1",
                period,
            );
            assert!(general.is_ok());
            if let Ok(budget) = general {
                assert_eq!(budget.category, BudgetCategory::General);
            }

            let other = validate_budget(
                &BudgetForm {
                    name: "June".to_string(),
                    monthly_amount: "400".to_string(),
                    category: Some("other".to_string()),
                },
                "user_1",
                period,
            );
            assert!(other.is_err());
        }
    }

    #[test]
    fn reminder_requires_real_due_date_and_offered_lead_time() {
        let invalid = validate_reminder(
            &ReminderForm {
                name: "Rent".to_string(),
                amount: "900".to_string(),
                due_date: "2025-06-31".to_string(),
                days_before: Some(3),
            },
            "user_1",
        );
        assert!(invalid.is_err());
        if let Err(error) = invalid {
            assert_eq!(issue_codes(&error), vec!["invalid_date", "invalid_choice"]);
        }

        let valid = validate_reminder(
            &ReminderForm {
                name: "Rent".to_string(),
                amount: "900".to_string(),
                due_date: "2025-06-10".to_string(),
                days_before: Some(5),
            },
            "user_1",
        );
        assert!(valid.is_ok());
        if let Ok(reminder) = valid {
            assert_eq!(reminder.lead_time, LeadTime::FiveDays);
            assert_eq!(
                reminder_trigger_date(reminder.due_date, reminder.lead_time.days()),
                june(5)
            );
        }
    }
}
