use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

pub const FILTERS_FILE_NAME: &str = "dashboard_filters.json";
pub const SESSION_FILE_NAME: &str = "auth_session.json";

pub fn resolve_dashboard_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("FINBOARD_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".finboard")
            } else {
                return Err(ClientError::state_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for dashboard state.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_dashboard_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn filters_path(home: &Path) -> PathBuf {
    home.join(FILTERS_FILE_NAME)
}

pub fn session_path(home: &Path) -> PathBuf {
    home.join(SESSION_FILE_NAME)
}

/// Reads a JSON state file.
///
/// Missing, unreadable or malformed files all yield `None`; the latter two
/// are logged.
pub fn read_json<T>(path: &Path) -> Option<T>
where
    T: DeserializeOwned,
{
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable state file: {error}");
            return None;
        }
    };

    match serde_json::from_str::<T>(&body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(path = %path.display(), "ignoring malformed state file: {error}");
            None
        }
    }
}

pub fn write_json<T>(path: &Path, value: &T) -> ClientResult<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        ensure_dashboard_directory(parent)?;
    }
    let body = serde_json::to_string_pretty(value)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    fs::write(path, body).map_err(|error| ClientError::state_write_failed(path, &error.to_string()))?;
    set_private_file_permissions_best_effort(path);
    Ok(())
}

pub fn remove_file_if_present(path: &Path) -> ClientResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(ClientError::state_write_failed(path, &error.to_string())),
    }
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::state_write_failed(path, &error.to_string());
    }

    ClientError::state_init_failed(path, &error.to_string())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::state_init_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}

#[cfg(unix)]
fn set_private_file_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
}

#[cfg(not(unix))]
fn set_private_file_permissions_best_effort(_path: &Path) {}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{read_json, remove_file_if_present, resolve_dashboard_home, write_json};

    #[test]
    fn explicit_home_override_wins() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        if let Ok(dir) = temp {
            let resolved = resolve_dashboard_home(Some(dir.path()));
            assert!(resolved.is_ok());
            if let Ok(path) = resolved {
                assert_eq!(path, dir.path());
            }
        }
    }

    #[test]
    fn json_state_round_trips_and_fails_closed() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        if let Ok(dir) = temp {
            let path = dir.path().join("nested").join("value.json");
            assert!(read_json::<Vec<String>>(&path).is_none());

            assert!(write_json(&path, &vec!["CA".to_string()]).is_ok());
            assert_eq!(read_json::<Vec<String>>(&path), Some(vec!["CA".to_string()]));

            assert!(fs::write(&path, "{not json").is_ok());
            assert!(read_json::<Vec<String>>(&path).is_none());

            assert_eq!(remove_file_if_present(&path).ok(), Some(true));
            assert_eq!(remove_file_if_present(&path).ok(), Some(false));
        }
    }
}
