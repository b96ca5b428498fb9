//! Persisted dashboard state: the active filter and the login session.
//!
//! Reads fail closed: a missing or malformed file behaves like no stored
//! state at all.

use std::path::Path;

use crate::ClientResult;
use crate::ledger::FilterSpec;
use crate::session::AuthSession;
use crate::state::{filters_path, read_json, remove_file_if_present, session_path, write_json};

pub fn load_filters(home: &Path) -> FilterSpec {
    read_json::<FilterSpec>(&filters_path(home)).unwrap_or_default()
}

pub fn save_filters(home: &Path, spec: &FilterSpec) -> ClientResult<()> {
    write_json(&filters_path(home), spec)
}

pub fn load_session(home: &Path) -> Option<AuthSession> {
    read_json::<AuthSession>(&session_path(home))
}

pub fn save_session(home: &Path, session: &AuthSession) -> ClientResult<()> {
    write_json(&session_path(home), session)
}

/// Returns whether a session file was removed.
pub fn clear_session(home: &Path) -> ClientResult<bool> {
    remove_file_if_present(&session_path(home))
}
