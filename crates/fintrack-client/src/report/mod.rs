pub mod aggregate;
pub mod budget_alert;
pub mod reminder_check;
pub mod state;

pub use aggregate::{Aggregation, CategoryTotal, ChartPoint, aggregate, relative_height};
pub use budget_alert::{OverBudget, check_budget};
pub use reminder_check::{DueReminder, ReminderCheckOutcome, run_reminder_check};
pub use state::{FetchTicket, ReportState, SettledTotal};
