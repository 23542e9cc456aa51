//! Record store gateway: per-table insert/select/delete scoped by the owning
//! user. `SqliteStore` is the shipped table store; anything that speaks the
//! same trait (a hosted backend client, a test double) can stand in for it.

mod sqlite;

use chrono::{SecondsFormat, Utc};
use ulid::Ulid;

use crate::ClientResult;
use crate::model::{
    Budget, BudgetCategory, Debt, NewBudget, NewDebt, NewReminder, NewTransaction, Period,
    Profile, Reminder, Transaction, TransactionKind,
};

pub use sqlite::SqliteStore;

pub trait RecordStore {
    fn insert_transaction(&mut self, new: &NewTransaction) -> ClientResult<Transaction>;

    /// Rows of `kind` owned by `user_id` whose date falls in `period`, in store order.
    fn select_transactions(
        &self,
        kind: TransactionKind,
        user_id: &str,
        period: Period,
    ) -> ClientResult<Vec<Transaction>>;

    /// Returns whether a row was removed.
    fn delete_transaction(
        &mut self,
        kind: TransactionKind,
        user_id: &str,
        id: &str,
    ) -> ClientResult<bool>;

    fn insert_debt(&mut self, new: &NewDebt) -> ClientResult<Debt>;

    fn select_debts(&self, user_id: &str) -> ClientResult<Vec<Debt>>;

    fn insert_budget(&mut self, new: &NewBudget) -> ClientResult<Budget>;

    /// `category: None` selects every budget of the period.
    fn select_budgets(
        &self,
        user_id: &str,
        period: Period,
        category: Option<BudgetCategory>,
    ) -> ClientResult<Vec<Budget>>;

    fn insert_reminder(&mut self, new: &NewReminder) -> ClientResult<Reminder>;

    fn select_reminders(&self, user_id: &str) -> ClientResult<Vec<Reminder>>;

    fn delete_reminder(&mut self, user_id: &str, id: &str) -> ClientResult<bool>;

    fn upsert_profile(&mut self, profile: &Profile) -> ClientResult<()>;

    fn select_profile(&self, user_id: &str) -> ClientResult<Option<Profile>>;
}

pub(crate) fn new_record_id(prefix: &str) -> String {
    format!("{prefix}_{}", Ulid::new())
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
