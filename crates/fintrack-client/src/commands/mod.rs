pub mod auth;
pub mod budgets;
mod common;
pub mod dashboard;
pub mod debts;
pub mod reminders;
pub mod report;
pub mod transactions;
