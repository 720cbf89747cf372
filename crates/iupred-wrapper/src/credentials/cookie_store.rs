//! Firefox cookie store reader.
//!
//! A running Firefox holds an exclusive lock on `cookies.sqlite`, so the
//! store is never opened in place: it is copied into a scratch directory,
//! the copy is queried read-only, and the copy is removed on every exit path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use crate::config::FIREFOX_PROFILE_DIRS;
use crate::error::{WrapperError, WrapperResult};

const COOKIES_FILE: &str = "cookies.sqlite";

const COOKIE_QUERY: &str = "SELECT name, value FROM moz_cookies WHERE host = ?1";

/// Expand a leading `~/` against the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Profile roots from the built-in candidate list, `~` expanded.
pub fn default_profile_dirs() -> Vec<PathBuf> {
    FIREFOX_PROFILE_DIRS.iter().map(|d| expand_tilde(d)).collect()
}

/// Validate an explicitly configured store path.
pub fn check_db_path(path: &Path) -> WrapperResult<PathBuf> {
    let expanded = match path.to_str() {
        Some(s) => expand_tilde(s),
        None => path.to_path_buf(),
    };
    if !expanded.exists() {
        return Err(WrapperError::CookieDbNotFound(format!(
            "[Errno 2] No such file or directory {}",
            path.display()
        )));
    }
    Ok(expanded)
}

/// Whether a profile directory name looks like a default profile
/// (`xxxx.default` or `xxxx.default-release` and friends).
fn is_default_profile(name: &str) -> bool {
    name.ends_with(".default") || name.contains(".default-")
}

/// Search profile roots, in order, for a default profile holding a cookie store.
pub fn find_cookies_db(profile_dirs: &[PathBuf]) -> WrapperResult<PathBuf> {
    for root in profile_dirs {
        let Ok(entries) = std::fs::read_dir(root) else {
            continue;
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_str().map(is_default_profile).unwrap_or(false))
            .map(|e| e.path().join(COOKIES_FILE))
            .filter(|p| p.is_file())
            .collect();
        // read_dir order is unspecified; keep the choice stable across runs.
        candidates.sort();

        if let Some(found) = candidates.into_iter().next() {
            debug!("found cookie store {}", found.display());
            return Ok(found);
        }
    }

    Err(WrapperError::CookieDbNotFound(format!(
        "searched {}",
        profile_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

/// Read all cookie `name -> value` pairs stored for `host`.
///
/// The store is copied into a fresh directory under `scratch_dir`. Opening a
/// WAL-mode store leaves `-wal` and `-shm` files beside the copy, so the
/// whole directory is removed before returning, whether or not the query
/// succeeded.
pub fn read_cookies(
    db_file: &Path,
    host: &str,
    scratch_dir: &Path,
) -> WrapperResult<HashMap<String, String>> {
    let tmp = tempfile::Builder::new()
        .prefix("cookies_tmp")
        .tempdir_in(scratch_dir)
        .map_err(WrapperError::cookies)?;
    let copy = tmp.path().join(COOKIES_FILE);

    let result = std::fs::copy(db_file, &copy)
        .map_err(WrapperError::cookies)
        .and_then(|_| query_cookies(&copy, host).map_err(WrapperError::cookies));

    debug!("Cleaning up...");
    if let Err(e) = tmp.close() {
        warn!("failed to remove temporary cookie store copy: {e}");
    }

    result
}

/// Run the host lookup against a store copy. The connection is dropped
/// before this returns so the file can be removed afterwards.
fn query_cookies(path: &Path, host: &str) -> rusqlite::Result<HashMap<String, String>> {
    let db = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = db.prepare(COOKIE_QUERY)?;

    let rows = stmt.query_map(rusqlite::params![host], |row| {
        let name: String = row.get(0)?;
        let value: String = row.get(1)?;
        Ok((name, value))
    })?;

    rows.collect()
}
