use std::path::Path;

use tracing::info;

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SessionData;
use crate::model::Profile;
use crate::session::{FileSessionProvider, Session, SessionLifecycle, SessionProvider};
use crate::setup::ensure_initialized_with_home_override;
use crate::home::HomePaths;
use crate::store::RecordStore;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct LoginOptions<'a> {
    pub user_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub home_override: Option<&'a Path>,
}

/// Identity is owned by an outside provider; this records the user it
/// vouched for as the active session and keeps the profile row current.
pub fn login(options: LoginOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "auth login";
    let user_id = options.user_id.trim();
    if user_id.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A user id is required to sign in.",
            Some(COMMAND),
        ));
    }

    let mut context = ensure_initialized_with_home_override(options.home_override)?;
    context.store.upsert_profile(&Profile {
        user_id: user_id.to_string(),
        full_name: non_blank(options.full_name),
        username: non_blank(options.username),
    })?;

    let session = Session::start(user_id, non_blank(options.email).as_deref());
    context.sessions.store(&session)?;
    info!(user_id, "signed in");
    success(COMMAND, session_data(Some(&session)))
}

pub fn logout(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let sessions = sessions_at(home_override)?;
    sessions.clear()?;
    success("auth logout", session_data(None))
}

pub fn status(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let sessions = sessions_at(home_override)?;
    let session = sessions.current()?;
    success("auth status", session_data(session.as_ref()))
}

/// Startup hook: call once per process before dispatching a command.
pub fn start_lifecycle(home_override: Option<&Path>) -> ClientResult<SessionLifecycle> {
    let sessions = sessions_at(home_override)?;
    SessionLifecycle::start(&sessions)
}

fn sessions_at(home_override: Option<&Path>) -> ClientResult<FileSessionProvider> {
    Ok(HomePaths::resolve(home_override)?.sessions())
}

fn session_data(session: Option<&Session>) -> SessionData {
    SessionData {
        signed_in: session.is_some(),
        user_id: session.map(|value| value.user_id.clone()),
        email: session.and_then(|value| value.email.clone()),
        started_at: session.map(|value| value.started_at.clone()),
        last_active_at: session.and_then(|value| value.last_active_at.clone()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
