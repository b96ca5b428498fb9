use std::path::Path;

use chrono::{DateTime, Utc};

use crate::commands::common::open_home;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{LogoutData, SessionData};
use crate::session::{AuthSession, CredentialVerifier, StaticCredentials, login};
use crate::store::{clear_session, load_session, save_session};
use crate::{ClientError, ClientResult};

pub struct LoginRunOptions<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub home_override: Option<&'a Path>,
    /// Defaults to [`StaticCredentials::from_env`].
    pub verifier: Option<&'a dyn CredentialVerifier>,
    pub now: Option<DateTime<Utc>>,
}

pub fn run_login(email: &str, password: &str) -> ClientResult<SuccessEnvelope> {
    run_login_with_options(LoginRunOptions {
        email,
        password,
        home_override: None,
        verifier: None,
        now: None,
    })
}

#[doc(hidden)]
pub fn run_login_with_options(options: LoginRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let home = open_home(options.home_override)?;
    let now = options.now.unwrap_or_else(Utc::now);
    let session = match options.verifier {
        Some(verifier) => login(verifier, options.email, options.password, now),
        None => login(&StaticCredentials::from_env(), options.email, options.password, now),
    };

    let Some(session) = session else {
        tracing::info!(email = options.email, "login refused");
        return Err(ClientError::invalid_credentials());
    };

    save_session(&home, &session)?;
    tracing::info!(email = %session.user.email, "logged in");
    success("login", session_data(Some(session)))
}

pub fn run_logout() -> ClientResult<SuccessEnvelope> {
    run_logout_with_home_override(None)
}

#[doc(hidden)]
pub fn run_logout_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let home = open_home(home_override)?;
    let session_cleared = clear_session(&home)?;
    if session_cleared {
        tracing::info!("logged out");
    }
    success("logout", LogoutData { session_cleared })
}

pub fn run_whoami() -> ClientResult<SuccessEnvelope> {
    run_whoami_with_home_override(None)
}

/// Reports the stored session; an absent session is not an error here.
#[doc(hidden)]
pub fn run_whoami_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let home = open_home(home_override)?;
    success("whoami", session_data(load_session(&home)))
}

fn session_data(session: Option<AuthSession>) -> SessionData {
    match session {
        Some(session) => SessionData {
            authenticated: true,
            user: Some(session.user),
            logged_at: Some(session.logged_at),
        },
        None => SessionData {
            authenticated: false,
            user: None,
            logged_at: None,
        },
    }
}
