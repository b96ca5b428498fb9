//! Credential verification and the persisted login session.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@dashboard.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    /// RFC 3339 timestamp of the successful login.
    #[serde(rename = "loggedAt")]
    pub logged_at: String,
}

/// Decides whether an email/password pair identifies a user.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Option<User>;
}

/// A single configured credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    email: String,
    password: String,
    name: String,
}

impl StaticCredentials {
    pub fn new(email: &str, password: &str, name: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    /// Defaults overridden by `FINBOARD_ADMIN_EMAIL`, `FINBOARD_ADMIN_PASSWORD`
    /// and `FINBOARD_ADMIN_NAME` when set.
    pub fn from_env() -> Self {
        Self {
            email: env_or("FINBOARD_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            password: env_or("FINBOARD_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            name: env_or("FINBOARD_ADMIN_NAME", DEFAULT_ADMIN_NAME),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_NAME)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<User> {
        if email == self.email && password == self.password {
            return Some(User {
                email: self.email.clone(),
                name: self.name.clone(),
            });
        }
        None
    }
}

pub fn login<V>(verifier: &V, email: &str, password: &str, now: DateTime<Utc>) -> Option<AuthSession>
where
    V: CredentialVerifier + ?Sized,
{
    let user = verifier.verify(email, password)?;
    Some(AuthSession {
        user,
        logged_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
