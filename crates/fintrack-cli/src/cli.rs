use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fintrack_client::model::TransactionKind;

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "date must use valid calendar values".to_string())
}

pub fn parse_kind(value: &str) -> Result<TransactionKind, String> {
    TransactionKind::parse(value).ok_or_else(|| "kind must be one of: expense, income".to_string())
}

pub const REPORT_AFTER_HELP: &str = "\
How reports work:
  A report covers one calendar month (the current one unless --month and
  --year are both given) and draws one bar per day that has records.
  --category narrows the bars and the total to one tag; the per-category
  ranking always covers the whole month.

Budget alerts:
  Expense reports compare the filtered total with the month's budget for
  the same category (`all` checks the `general` budget). A total strictly
  above the budget prints the overage.
";

#[derive(Debug, Parser)]
#[command(
    name = "fintrack",
    version,
    about = "personal finance tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Data directory (overrides FINTRACK_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, or show the active session
    #[command(arg_required_else_help = true)]
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Greeting, screen shortcuts, and any payment reminder due today
    Dashboard {
        /// Evaluate as if today were this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        today: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Record, list, or remove expenses
    #[command(arg_required_else_help = true)]
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Record, list, or remove income
    #[command(arg_required_else_help = true)]
    Income {
        #[command(subcommand)]
        command: IncomeCommand,
    },
    /// Track recurring debt payments
    #[command(arg_required_else_help = true)]
    Debt {
        #[command(subcommand)]
        command: DebtCommand,
    },
    /// Monthly spending limits per category
    #[command(arg_required_else_help = true)]
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },
    /// Payment reminders shown on the dashboard
    #[command(arg_required_else_help = true)]
    Reminder {
        #[command(subcommand)]
        command: ReminderCommand,
    },
    /// Daily chart, category ranking, and budget check for one month
    #[command(after_help = REPORT_AFTER_HELP)]
    Report {
        #[arg(long, value_parser = parse_kind, default_value = "expense")]
        kind: TransactionKind,
        /// `all` or a category/type tag
        #[arg(long, default_value = "all")]
        category: String,
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// Calendar month 1-12 (requires --year)
    #[arg(long)]
    pub month: Option<u32>,
    /// Calendar year (requires --month)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AuthCommand {
    /// Record the user vouched for by your identity provider as signed in
    Login {
        user_id: String,
        #[arg(long)]
        email: Option<String>,
        /// Full name used for the dashboard greeting
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// End the active session
    Logout {
        #[arg(long)]
        json: bool,
    },
    /// Show the active session
    Status {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExpenseCommand {
    /// Record an expense
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        amount: String,
        /// food, transport, entertainment, shopping, health, groceries, utilities, other
        #[arg(long)]
        category: Option<String>,
        /// card or cash
        #[arg(long)]
        method: Option<String>,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List expenses for one month
    List {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        json: bool,
    },
    /// Remove an expense by id
    Remove {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum IncomeCommand {
    /// Record income
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        amount: String,
        /// salary, freelance, passive, investment, refund, gift, bonus, other
        #[arg(long = "type")]
        income_type: Option<String>,
        /// monthly or onetime
        #[arg(long)]
        frequency: Option<String>,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List income for one month
    List {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        json: bool,
    },
    /// Remove income by id
    Remove {
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum DebtCommand {
    /// Record a debt and its monthly payment
    Add {
        #[arg(long, default_value = "")]
        name: String,
        /// Monthly payment
        #[arg(long, default_value = "")]
        amount: String,
        /// creditCard, studentLoan, mortgage, carLoan, medicalDebt, personalLoan, other
        #[arg(long = "type")]
        debt_type: Option<String>,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List debts and the combined monthly payment
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum BudgetCommand {
    /// Set a monthly limit for a category (or `general` for all spending)
    Create {
        #[arg(long, default_value = "")]
        name: String,
        /// Monthly limit
        #[arg(long, default_value = "")]
        amount: String,
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        json: bool,
    },
    /// List budgets for one month
    List {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReminderCommand {
    /// Schedule a reminder ahead of a payment's due date
    Set {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        amount: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        due_date: String,
        /// Lead time: 1, 5, 7, 14, or 30 days
        #[arg(long)]
        days_before: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// List scheduled reminders
    List {
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
