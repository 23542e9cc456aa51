use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::ClientResult;
use crate::model::Reminder;
use crate::store::RecordStore;
use crate::validate::reminder_trigger_date;

#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub reminder_id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub trigger_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderCheckOutcome {
    NoReminders,
    NotYetDue {
        reminder_id: String,
        trigger_date: NaiveDate,
    },
    /// The alert fired. `delete_error` is set when the record could not be
    /// removed; the delete is not retried, so the alert may repeat next load.
    Fired {
        reminder: DueReminder,
        deleted: bool,
        delete_error: Option<String>,
    },
}

/// `Some` when `today` is on or after the reminder's trigger date.
pub fn due_reminder(reminder: &Reminder, today: NaiveDate) -> Option<DueReminder> {
    let trigger_date = reminder_trigger_date(reminder.due_date, reminder.days_before);
    if trigger_date > today {
        return None;
    }
    Some(DueReminder {
        reminder_id: reminder.id.clone(),
        name: reminder.name.clone(),
        amount: reminder.amount,
        due_date: reminder.due_date,
        trigger_date,
    })
}

/// Inspects the first reminder the store returns for the user; a fired
/// reminder is deleted so it alerts at most once.
pub fn run_reminder_check(
    store: &mut dyn RecordStore,
    user_id: &str,
    today: NaiveDate,
) -> ClientResult<ReminderCheckOutcome> {
    let reminders = store.select_reminders(user_id)?;
    let Some(first) = reminders.first() else {
        debug!(user_id, "no reminders to check");
        return Ok(ReminderCheckOutcome::NoReminders);
    };

    let Some(due) = due_reminder(first, today) else {
        return Ok(ReminderCheckOutcome::NotYetDue {
            reminder_id: first.id.clone(),
            trigger_date: reminder_trigger_date(first.due_date, first.days_before),
        });
    };

    info!(reminder_id = %due.reminder_id, name = %due.name, "payment reminder due");
    let (deleted, delete_error) = match store.delete_reminder(user_id, &due.reminder_id) {
        Ok(removed) => (removed, None),
        Err(error) => {
            warn!(reminder_id = %due.reminder_id, %error, "could not delete fired reminder");
            (false, Some(error.message))
        }
    };

    Ok(ReminderCheckOutcome::Fired {
        reminder: due,
        deleted,
        delete_error,
    })
}
