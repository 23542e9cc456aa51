use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::ClientResult;
use crate::home::HomePaths;
use crate::model::{from_cents, sum_cents};
use crate::session::SessionProvider;
use crate::setup::{AppContext, open_store};

/// The resolved home directory and the signed-in user, if any.
pub(crate) struct UserScope {
    pub(crate) paths: HomePaths,
    pub(crate) user_id: Option<String>,
}

impl UserScope {
    pub(crate) fn open_store(&self) -> ClientResult<AppContext> {
        open_store(self.paths.clone())
    }
}

/// Reads the session before anything touches the store, so a signed-out
/// command never opens or writes the database.
pub(crate) fn resolve_user(home_override: Option<&Path>, command: &str) -> ClientResult<UserScope> {
    let paths = HomePaths::resolve(home_override)?;
    let user_id = paths.sessions().current()?.map(|session| session.user_id);
    if user_id.is_none() {
        warn!(command, "no active session; skipping store operations");
    }
    Ok(UserScope { paths, user_id })
}

pub(crate) fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn sum_amounts(amounts: impl Iterator<Item = f64>) -> f64 {
    from_cents(sum_cents(amounts))
}
