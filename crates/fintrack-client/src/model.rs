use chrono::{Datelike, NaiveDate};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub const fn table(self) -> &'static str {
        match self {
            Self::Expense => "expenses",
            Self::Income => "incomes",
        }
    }

    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Expense => "exp",
            Self::Income => "inc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expense" | "expenses" => Some(Self::Expense),
            "income" | "incomes" => Some(Self::Income),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Health,
    Groceries,
    Utilities,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [Self; 8] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Shopping,
        Self::Health,
        Self::Groceries,
        Self::Utilities,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Groceries => "groceries",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Groceries => "Groceries",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [Self; 2] = [Self::Card, Self::Cash];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeType {
    Salary,
    Freelance,
    Passive,
    Investment,
    Refund,
    Gift,
    Bonus,
    Other,
}

impl IncomeType {
    pub const ALL: [Self; 8] = [
        Self::Salary,
        Self::Freelance,
        Self::Passive,
        Self::Investment,
        Self::Refund,
        Self::Gift,
        Self::Bonus,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelance => "freelance",
            Self::Passive => "passive",
            Self::Investment => "investment",
            Self::Refund => "refund",
            Self::Gift => "gift",
            Self::Bonus => "bonus",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeFrequency {
    Monthly,
    OneTime,
}

impl IncomeFrequency {
    pub const ALL: [Self; 2] = [Self::Monthly, Self::OneTime];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::OneTime => "onetime",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|frequency| frequency.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebtType {
    CreditCard,
    StudentLoan,
    Mortgage,
    CarLoan,
    MedicalDebt,
    PersonalLoan,
    Other,
}

impl DebtType {
    pub const ALL: [Self; 7] = [
        Self::CreditCard,
        Self::StudentLoan,
        Self::Mortgage,
        Self::CarLoan,
        Self::MedicalDebt,
        Self::PersonalLoan,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "creditCard",
            Self::StudentLoan => "studentLoan",
            Self::Mortgage => "mortgage",
            Self::CarLoan => "carLoan",
            Self::MedicalDebt => "medicalDebt",
            Self::PersonalLoan => "personalLoan",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == value)
    }
}

/// Budget scope. `General` is stored as `general` and covers every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetCategory {
    General,
    Category(ExpenseCategory),
}

impl BudgetCategory {
    pub const GENERAL_TAG: &'static str = "general";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => Self::GENERAL_TAG,
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "All Categories",
            Self::Category(category) => category.label(),
        }
    }

    /// Budgets cannot target `other`.
    pub fn parse(value: &str) -> Option<Self> {
        if value == Self::GENERAL_TAG {
            return Some(Self::General);
        }
        match ExpenseCategory::parse(value)? {
            ExpenseCategory::Other => None,
            category => Some(Self::Category(category)),
        }
    }

    /// Maps a report filter onto the budget row that governs it.
    pub fn for_filter(filter: &CategoryFilter) -> Option<Self> {
        match filter {
            CategoryFilter::All => Some(Self::General),
            CategoryFilter::Tag(tag) => Self::parse(tag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadTime {
    OneDay,
    FiveDays,
    OneWeek,
    TwoWeeks,
    ThirtyDays,
}

impl LeadTime {
    pub const ALL: [Self; 5] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneWeek,
        Self::TwoWeeks,
        Self::ThirtyDays,
    ];

    pub const fn days(self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::ThirtyDays => 30,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|lead| lead.days() == days)
    }
}

/// A (month, year) pair scoping transaction and budget queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> ClientResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ClientError::invalid_argument(&format!(
                "`month` must be between 1 and 12, got {month}."
            )));
        }
        if !(1900..=9999).contains(&year) {
            return Err(ClientError::invalid_argument(&format!(
                "`year` must be a four-digit year, got {year}."
            )));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn label(self) -> String {
        format!("{} / {}", self.month, self.year)
    }
}

/// Category selector of the report view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Tag(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        Self::Tag(trimmed.to_string())
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(selected) => selected == tag,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Tag(tag) => tag,
        }
    }
}

/// Amounts are stored as `f64` but summed and compared in whole cents.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

pub fn sum_cents(amounts: impl Iterator<Item = f64>) -> i64 {
    amounts.map(to_cents).sum()
}

/// An expense or income row. `tag` is the category (expense) or type
/// (income); `method` is the payment method (expense) or frequency (income).
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub name: String,
    pub amount: f64,
    pub tag: String,
    pub method: String,
    pub date: NaiveDate,
    pub created_at: String,
}

impl Transaction {
    pub fn period(&self) -> Period {
        Period::containing(self.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: String,
    pub kind: TransactionKind,
    pub name: String,
    pub amount: f64,
    pub tag: String,
    pub method: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub monthly_payment: f64,
    pub debt_type: String,
    pub start_date: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub user_id: String,
    pub name: String,
    pub monthly_payment: f64,
    pub debt_type: DebtType,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub monthly_amount: f64,
    pub period: Period,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub user_id: String,
    pub name: String,
    pub category: BudgetCategory,
    pub monthly_amount: f64,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub days_before: i64,
    pub reminder_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub lead_time: LeadTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

impl Profile {
    /// First word of the full name, then the username, then `User`.
    pub fn greeting_name(&self) -> String {
        if let Some(full_name) = self.full_name.as_deref().map(str::trim)
            && let Some(first) = full_name.split_whitespace().next()
        {
            return first.to_string();
        }
        match self.username.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => "User".to_string(),
        }
    }
}
