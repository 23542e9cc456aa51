use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rusqlite::types::Type;
use rusqlite::ffi::ErrorCode;
use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Row, params};
use thiserror::Error;
use tracing::{debug, info};

use super::{RecordStore, new_record_id, now_timestamp};
use crate::{ClientError, ClientResult};
use crate::date::{format_iso_date, parse_stored_date};
use crate::model::{
    Budget, BudgetCategory, Debt, NewBudget, NewDebt, NewReminder, NewTransaction, Period,
    Profile, Reminder, Transaction, TransactionKind,
};
use crate::validate::reminder_trigger_date;

#[derive(Debug, Error)]
#[error("stored value `{0}` is not a YYYY-MM-DD date")]
struct StoredDateError(String);

#[derive(Debug, Error)]
#[error("stored value `{0}` is not a valid month")]
struct StoredPeriodError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreAction {
    Insert,
    Select,
    Delete,
    Upsert,
}

impl StoreAction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Select => "select",
            Self::Delete => "delete",
            Self::Upsert => "upsert",
        }
    }
}

/// Lock and corruption keep their store-wide codes; anything else names the
/// table and the operation that failed.
fn store_error(db_path: &Path, action: StoreAction, table: &str, error: &SqliteError) -> ClientError {
    match error {
        SqliteError::FromSqlConversionFailure(..) | SqliteError::InvalidColumnType(..) => {
            return ClientError::store_row_invalid(table, &error.to_string());
        }
        _ => {}
    }
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(db_path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(db_path)
        }
        _ => ClientError::store_failed(action.as_str(), table, &error.to_string()),
    }
}

pub struct SqliteStore {
    connection: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Wraps a connection whose schema is already migrated.
    pub fn new(connection: Connection, db_path: &Path) -> Self {
        Self {
            connection,
            db_path: db_path.to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn fail(
        &self,
        action: StoreAction,
        table: &'static str,
    ) -> impl Fn(SqliteError) -> ClientError + '_ {
        move |error| store_error(&self.db_path, action, table, &error)
    }

    fn tag_columns(kind: TransactionKind) -> (&'static str, &'static str) {
        match kind {
            TransactionKind::Expense => ("category", "payment_method"),
            TransactionKind::Income => ("type", "frequency"),
        }
    }
}

impl RecordStore for SqliteStore {
    fn insert_transaction(&mut self, new: &NewTransaction) -> ClientResult<Transaction> {
        let id = new_record_id(new.kind.id_prefix());
        let created_at = now_timestamp();
        let (tag_column, method_column) = Self::tag_columns(new.kind);
        let sql = format!(
            "INSERT INTO {table} (
                id, user_id, name, amount, {tag_column}, {method_column},
                date, month, year, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            table = new.kind.table(),
        );
        self.connection
            .execute(
                &sql,
                params![
                    &id,
                    &new.user_id,
                    &new.name,
                    new.amount,
                    &new.tag,
                    &new.method,
                    format_iso_date(&new.date),
                    new.date.month(),
                    new.date.year(),
                    &created_at,
                ],
            )
            .map_err(self.fail(StoreAction::Insert, new.kind.table()))?;
        info!(table = new.kind.table(), id = %id, "inserted transaction");

        Ok(Transaction {
            id,
            user_id: new.user_id.clone(),
            kind: new.kind,
            name: new.name.clone(),
            amount: new.amount,
            tag: new.tag.clone(),
            method: new.method.clone(),
            date: new.date,
            created_at,
        })
    }

    fn select_transactions(
        &self,
        kind: TransactionKind,
        user_id: &str,
        period: Period,
    ) -> ClientResult<Vec<Transaction>> {
        let (tag_column, method_column) = Self::tag_columns(kind);
        let sql = format!(
            "SELECT id, user_id, name, amount, {tag_column}, {method_column}, date, created_at
             FROM {table}
             WHERE user_id = ?1 AND month = ?2 AND year = ?3
             ORDER BY rowid",
            table = kind.table(),
        );
        debug!(table = kind.table(), user_id, month = period.month(), year = period.year(), "selecting transactions");
        let mut statement = self
            .connection
            .prepare(&sql)
            .map_err(self.fail(StoreAction::Select, kind.table()))?;
        let rows = statement
            .query_map(params![user_id, period.month(), period.year()], |row| {
                Ok(Transaction {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    kind,
                    name: row.get(2)?,
                    amount: row.get(3)?,
                    tag: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    method: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    date: column_date(row, 6)?,
                    created_at: row.get(7)?,
                })
            })
            .map_err(self.fail(StoreAction::Select, kind.table()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(self.fail(StoreAction::Select, kind.table()))
    }

    fn delete_transaction(
        &mut self,
        kind: TransactionKind,
        user_id: &str,
        id: &str,
    ) -> ClientResult<bool> {
        let sql = format!(
            "DELETE FROM {table} WHERE id = ?1 AND user_id = ?2",
            table = kind.table()
        );
        let removed = self
            .connection
            .execute(&sql, params![id, user_id])
            .map_err(self.fail(StoreAction::Delete, kind.table()))?;
        info!(table = kind.table(), id, removed, "deleted transaction");
        Ok(removed > 0)
    }

    fn insert_debt(&mut self, new: &NewDebt) -> ClientResult<Debt> {
        let id = new_record_id("debt");
        let created_at = now_timestamp();
        self.connection
            .execute(
                "INSERT INTO debts (id, user_id, name, monthly_payment, type, start_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &id,
                    &new.user_id,
                    &new.name,
                    new.monthly_payment,
                    new.debt_type.as_str(),
                    format_iso_date(&new.start_date),
                    &created_at,
                ],
            )
            .map_err(self.fail(StoreAction::Insert, "debts"))?;
        info!(table = "debts", id = %id, "inserted debt");

        Ok(Debt {
            id,
            user_id: new.user_id.clone(),
            name: new.name.clone(),
            monthly_payment: new.monthly_payment,
            debt_type: new.debt_type.as_str().to_string(),
            start_date: new.start_date,
            created_at,
        })
    }

    fn select_debts(&self, user_id: &str) -> ClientResult<Vec<Debt>> {
        debug!(table = "debts", user_id, "selecting debts");
        let mut statement = self
            .connection
            .prepare(
                "SELECT id, user_id, name, monthly_payment, type, start_date, created_at
                 FROM debts WHERE user_id = ?1 ORDER BY rowid",
            )
            .map_err(self.fail(StoreAction::Select, "debts"))?;
        let rows = statement
            .query_map([user_id], |row| {
                Ok(Debt {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    monthly_payment: row.get(3)?,
                    debt_type: row.get(4)?,
                    start_date: column_date(row, 5)?,
                    created_at: row.get(6)?,
                })
            })
            .map_err(self.fail(StoreAction::Select, "debts"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(self.fail(StoreAction::Select, "debts"))
    }

    fn insert_budget(&mut self, new: &NewBudget) -> ClientResult<Budget> {
        let id = new_record_id("bud");
        let created_at = now_timestamp();
        self.connection
            .execute(
                "INSERT INTO budgets (id, user_id, name, category, monthly_amount, month, year, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    &id,
                    &new.user_id,
                    &new.name,
                    new.category.as_str(),
                    new.monthly_amount,
                    new.period.month(),
                    new.period.year(),
                    &created_at,
                ],
            )
            .map_err(self.fail(StoreAction::Insert, "budgets"))?;
        info!(table = "budgets", id = %id, category = new.category.as_str(), "inserted budget");

        Ok(Budget {
            id,
            user_id: new.user_id.clone(),
            name: new.name.clone(),
            category: new.category.as_str().to_string(),
            monthly_amount: new.monthly_amount,
            period: new.period,
            created_at,
        })
    }

    fn select_budgets(
        &self,
        user_id: &str,
        period: Period,
        category: Option<BudgetCategory>,
    ) -> ClientResult<Vec<Budget>> {
        debug!(
            table = "budgets",
            user_id,
            month = period.month(),
            year = period.year(),
            category = category.map(BudgetCategory::as_str),
            "selecting budgets"
        );
        let mut statement = self
            .connection
            .prepare(
                "SELECT id, user_id, name, category, monthly_amount, month, year, created_at
                 FROM budgets
                 WHERE user_id = ?1 AND month = ?2 AND year = ?3
                   AND (?4 IS NULL OR category = ?4)
                 ORDER BY rowid",
            )
            .map_err(self.fail(StoreAction::Select, "budgets"))?;
        let rows = statement
            .query_map(
                params![
                    user_id,
                    period.month(),
                    period.year(),
                    category.map(BudgetCategory::as_str)
                ],
                |row| {
                    Ok(Budget {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                        category: row.get(3)?,
                        monthly_amount: row.get(4)?,
                        period: column_period(row, 5, 6)?,
                        created_at: row.get(7)?,
                    })
                },
            )
            .map_err(self.fail(StoreAction::Select, "budgets"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(self.fail(StoreAction::Select, "budgets"))
    }

    fn insert_reminder(&mut self, new: &NewReminder) -> ClientResult<Reminder> {
        let id = new_record_id("rem");
        let created_at = now_timestamp();
        let days_before = new.lead_time.days();
        let reminder_date = reminder_trigger_date(new.due_date, days_before);
        self.connection
            .execute(
                "INSERT INTO reminders (
                    id, user_id, name, amount, due_date, days_before,
                    reminder_date, is_completed, month, year, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, ?10)",
                params![
                    &id,
                    &new.user_id,
                    &new.name,
                    new.amount,
                    format_iso_date(&new.due_date),
                    days_before,
                    format_iso_date(&reminder_date),
                    new.due_date.month(),
                    new.due_date.year(),
                    &created_at,
                ],
            )
            .map_err(self.fail(StoreAction::Insert, "reminders"))?;
        info!(table = "reminders", id = %id, "inserted reminder");

        Ok(Reminder {
            id,
            user_id: new.user_id.clone(),
            name: new.name.clone(),
            amount: new.amount,
            due_date: new.due_date,
            days_before,
            reminder_date,
            is_completed: false,
            created_at,
        })
    }

    fn select_reminders(&self, user_id: &str) -> ClientResult<Vec<Reminder>> {
        debug!(table = "reminders", user_id, "selecting reminders");
        let mut statement = self
            .connection
            .prepare(
                "SELECT id, user_id, name, amount, due_date, days_before,
                        reminder_date, is_completed, created_at
                 FROM reminders WHERE user_id = ?1 ORDER BY rowid",
            )
            .map_err(self.fail(StoreAction::Select, "reminders"))?;
        let rows = statement
            .query_map([user_id], |row| {
                Ok(Reminder {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    amount: row.get(3)?,
                    due_date: column_date(row, 4)?,
                    days_before: row.get(5)?,
                    reminder_date: column_date(row, 6)?,
                    is_completed: row.get::<_, i64>(7)? != 0,
                    created_at: row.get(8)?,
                })
            })
            .map_err(self.fail(StoreAction::Select, "reminders"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(self.fail(StoreAction::Select, "reminders"))
    }

    fn delete_reminder(&mut self, user_id: &str, id: &str) -> ClientResult<bool> {
        let removed = self
            .connection
            .execute(
                "DELETE FROM reminders WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .map_err(self.fail(StoreAction::Delete, "reminders"))?;
        info!(table = "reminders", id, removed, "deleted reminder");
        Ok(removed > 0)
    }

    fn upsert_profile(&mut self, profile: &Profile) -> ClientResult<()> {
        self.connection
            .execute(
                "INSERT INTO profiles (user_id, full_name, username, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id) DO UPDATE SET
                    full_name = COALESCE(excluded.full_name, profiles.full_name),
                    username = COALESCE(excluded.username, profiles.username),
                    updated_at = excluded.updated_at",
                params![
                    &profile.user_id,
                    &profile.full_name,
                    &profile.username,
                    now_timestamp(),
                ],
            )
            .map_err(self.fail(StoreAction::Upsert, "profiles"))?;
        Ok(())
    }

    fn select_profile(&self, user_id: &str) -> ClientResult<Option<Profile>> {
        self.connection
            .query_row(
                "SELECT user_id, full_name, username FROM profiles WHERE user_id = ?1",
                [user_id],
                |row| {
                    Ok(Profile {
                        user_id: row.get(0)?,
                        full_name: row.get(1)?,
                        username: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(self.fail(StoreAction::Select, "profiles"))
    }
}

fn column_date(row: &Row<'_>, index: usize) -> rusqlite::Result<NaiveDate> {
    let raw = row.get::<_, String>(index)?;
    parse_stored_date(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(StoredDateError(raw)))
    })
}

fn column_period(row: &Row<'_>, month_index: usize, year_index: usize) -> rusqlite::Result<Period> {
    let month = row.get::<_, u32>(month_index)?;
    let year = row.get::<_, i32>(year_index)?;
    Period::new(month, year).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            month_index,
            Type::Integer,
            Box::new(StoredPeriodError(format!("{month}/{year}"))),
        )
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::Connection;

    use super::SqliteStore;
    use crate::migrations::run_pending;
    use crate::model::{
        BudgetCategory, ExpenseCategory, LeadTime, NewBudget, NewReminder, NewTransaction, Period,
        Profile, TransactionKind,
    };
    use crate::store::RecordStore;

    fn memory_store() -> Option<SqliteStore> {
        let mut connection = Connection::open_in_memory().ok()?;
        run_pending(&mut connection).ok()?;
        Some(SqliteStore::new(connection, std::path::Path::new(":memory:")))
    }

    fn expense(user_id: &str, date: NaiveDate, amount: f64) -> NewTransaction {
        NewTransaction {
            user_id: user_id.to_string(),
            kind: TransactionKind::Expense,
            name: "Groceries run".to_string(),
            amount,
            tag: "groceries".to_string(),
            method: "card".to_string(),
            date,
        }
    }

    #[test]
    fn transactions_are_scoped_by_user_and_period() {
        let store = memory_store();
        assert!(store.is_some());
        let (Some(mut store), Some(june), Some(july)) = (
            store,
            NaiveDate::from_ymd_opt(2025, 6, 3),
            NaiveDate::from_ymd_opt(2025, 7, 1),
        ) else {
            return;
        };

        assert!(store.insert_transaction(&expense("alice", june, 10.0)).is_ok());
        assert!(store.insert_transaction(&expense("alice", july, 20.0)).is_ok());
        assert!(store.insert_transaction(&expense("bob", june, 30.0)).is_ok());

        let period = Period::containing(june);
        let rows = store.select_transactions(TransactionKind::Expense, "alice", period);
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].amount, 10.0);
            assert!(rows[0].id.starts_with("exp_"));
        }

        let incomes = store.select_transactions(TransactionKind::Income, "alice", period);
        assert_eq!(incomes.map(|rows| rows.len()).ok(), Some(0));
    }

    #[test]
    fn delete_only_removes_rows_owned_by_the_user() {
        let Some(mut store) = memory_store() else {
            return;
        };
        let Some(june) = NaiveDate::from_ymd_opt(2025, 6, 3) else {
            return;
        };
        let inserted = store.insert_transaction(&expense("alice", june, 10.0));
        assert!(inserted.is_ok());
        if let Ok(row) = inserted {
            let foreign = store.delete_transaction(TransactionKind::Expense, "bob", &row.id);
            assert_eq!(foreign.ok(), Some(false));
            let own = store.delete_transaction(TransactionKind::Expense, "alice", &row.id);
            assert_eq!(own.ok(), Some(true));
        }
    }

    #[test]
    fn budgets_filter_by_category_when_requested() {
        let Some(mut store) = memory_store() else {
            return;
        };
        let Ok(period) = Period::new(6, 2025) else {
            return;
        };
        for category in [
            BudgetCategory::General,
            BudgetCategory::Category(ExpenseCategory::Food),
        ] {
            let created = store.insert_budget(&NewBudget {
                user_id: "alice".to_string(),
                name: "June".to_string(),
                category,
                monthly_amount: 100.0,
                period,
            });
            assert!(created.is_ok());
        }

        let food = store.select_budgets(
            "alice",
            period,
            Some(BudgetCategory::Category(ExpenseCategory::Food)),
        );
        assert_eq!(food.map(|rows| rows.len()).ok(), Some(1));
        let every = store.select_budgets("alice", period, None);
        assert_eq!(every.map(|rows| rows.len()).ok(), Some(2));
    }

    #[test]
    fn reminder_insert_derives_trigger_date() {
        let Some(mut store) = memory_store() else {
            return;
        };
        let Some(due) = NaiveDate::from_ymd_opt(2025, 6, 10) else {
            return;
        };
        let created = store.insert_reminder(&NewReminder {
            user_id: "alice".to_string(),
            name: "Rent".to_string(),
            amount: 900.0,
            due_date: due,
            lead_time: LeadTime::FiveDays,
        });
        assert!(created.is_ok());

        let rows = store.select_reminders("alice");
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].reminder_date, NaiveDate::from_ymd_opt(2025, 6, 5).unwrap_or(due));
            assert_eq!(rows[0].days_before, 5);
            assert!(!rows[0].is_completed);
        }
    }

    #[test]
    fn profile_upsert_keeps_existing_fields_when_omitted() {
        let Some(mut store) = memory_store() else {
            return;
        };
        let first = store.upsert_profile(&Profile {
            user_id: "alice".to_string(),
            full_name: Some("Alice Wong".to_string()),
            username: Some("alice".to_string()),
        });
        assert!(first.is_ok());
        let second = store.upsert_profile(&Profile {
            user_id: "alice".to_string(),
            full_name: None,
            username: Some("awong".to_string()),
        });
        assert!(second.is_ok());

        let profile = store.select_profile("alice");
        assert!(profile.is_ok());
        if let Ok(Some(profile)) = profile {
            assert_eq!(profile.full_name.as_deref(), Some("Alice Wong"));
            assert_eq!(profile.username.as_deref(), Some("awong"));
        }
        assert_eq!(store.select_profile("nobody").ok(), Some(None));
    }

    #[test]
    fn failures_name_the_table_and_action() {
        let Ok(connection) = Connection::open_in_memory() else {
            return;
        };
        let store = SqliteStore::new(connection, std::path::Path::new(":memory:"));
        let result = store.select_debts("alice");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "store_failed");
            let data = error.data.unwrap_or_default();
            assert_eq!(data.get("table").and_then(|v| v.as_str()), Some("debts"));
            assert_eq!(data.get("action").and_then(|v| v.as_str()), Some("select"));
        }
    }

    #[test]
    fn undecodable_stored_date_is_a_row_error() {
        let Some(store) = memory_store() else {
            return;
        };
        let inserted = store.connection.execute(
            "INSERT INTO debts (id, user_id, name, monthly_payment, type, start_date, created_at)
             VALUES ('debt_1', 'alice', 'Visa', 50.0, 'creditCard', 'someday', 'now')",
            [],
        );
        assert!(inserted.is_ok());
        let result = store.select_debts("alice");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "store_row_invalid");
            assert!(error.message.contains("`debts`"));
        }
    }
}
