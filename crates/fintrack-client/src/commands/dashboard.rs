use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::{resolve_user, today_or_local};
use crate::contracts::envelope::{SuccessEnvelope, skipped_without_session, success};
use crate::contracts::types::{DashboardData, ReminderAlertData};
use crate::date::format_iso_date;
use crate::model::Profile;
use crate::report::{ReminderCheckOutcome, run_reminder_check};
use crate::screen::Screen;
use crate::store::RecordStore;

const COMMAND: &str = "dashboard";

#[derive(Debug, Default)]
pub struct DashboardOptions<'a> {
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

/// Greets the user and runs the single reminder check of this load.
pub fn run(options: DashboardOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let scope = resolve_user(options.home_override, COMMAND)?;
    let Some(user_id) = scope.user_id.as_deref() else {
        return skipped_without_session(COMMAND);
    };

    let today = today_or_local(options.today);
    let mut context = scope.open_store()?;
    let profile = context
        .store
        .select_profile(user_id)?
        .unwrap_or_else(|| Profile {
            user_id: user_id.to_string(),
            full_name: None,
            username: None,
        });

    let outcome = run_reminder_check(&mut context.store, user_id, today)?;
    let reminder_alert = match outcome {
        ReminderCheckOutcome::Fired {
            reminder,
            deleted,
            delete_error,
        } => Some(ReminderAlertData {
            reminder_id: reminder.reminder_id,
            name: reminder.name,
            amount: reminder.amount,
            due_date: format_iso_date(&reminder.due_date),
            trigger_date: format_iso_date(&reminder.trigger_date),
            deleted,
            delete_error,
        }),
        ReminderCheckOutcome::NoReminders | ReminderCheckOutcome::NotYetDue { .. } => None,
    };

    success(
        COMMAND,
        DashboardData {
            greeting: format!("Hi {}!", profile.greeting_name()),
            today: format_iso_date(&today),
            cards: Screen::ALL.iter().map(|screen| screen.card()).collect(),
            reminder_alert,
        },
    )
}
