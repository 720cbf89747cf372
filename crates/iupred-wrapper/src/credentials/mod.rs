//! Credential resolution for the IUPred3 service.
//!
//! The service only accepts submissions carrying a CSRF token and a session
//! id that belong together. They come from the command line or, when either
//! is left empty, from the Firefox cookie store of a user who has visited
//! the site.

pub mod cookie_store;

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{DEFAULT_SESSION_ID, DEFAULT_TOKEN};
use crate::error::WrapperResult;

/// Cookie name of the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Cookie name of the session id.
pub const SESSION_COOKIE: &str = "sessionid";

/// The pair of values every request to the service carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub csrf_token: String,
    pub session_id: String,
}

impl Credentials {
    pub fn new(csrf_token: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            session_id: session_id.into(),
        }
    }

    /// Both values present, so no lookup is needed.
    pub fn is_complete(&self) -> bool {
        !self.csrf_token.is_empty() && !self.session_id.is_empty()
    }

    /// Fill empty values with the built-in defaults.
    pub fn or_defaults(mut self) -> Self {
        if self.csrf_token.is_empty() {
            self.csrf_token = DEFAULT_TOKEN.to_string();
        }
        if self.session_id.is_empty() {
            self.session_id = DEFAULT_SESSION_ID.to_string();
        }
        self
    }

    /// Overlay cookie values found in a store. Names that were not found
    /// keep their current value.
    pub fn merged_with(mut self, cookies: &HashMap<String, String>) -> Self {
        if let Some(token) = cookies.get(CSRF_COOKIE) {
            self.csrf_token = token.clone();
        }
        if let Some(session) = cookies.get(SESSION_COOKIE) {
            self.session_id = session.clone();
        }
        self
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!(
            "{CSRF_COOKIE}={}; {SESSION_COOKIE}={}",
            self.csrf_token, self.session_id
        )
    }
}

/// Where the resolver should look when the supplied values are incomplete.
#[derive(Debug, Clone)]
pub struct CookieLookup<'a> {
    /// Explicit path to a `cookies.sqlite`; searched for when `None`.
    pub db_path: Option<&'a Path>,
    /// Host filter applied to `moz_cookies`.
    pub host: &'a str,
    /// Directory that receives the temporary copy of the store.
    pub scratch_dir: &'a Path,
}

/// Produce credentials for this run.
///
/// Complete `supplied` credentials are returned untouched and the cookie
/// store is never opened. Otherwise the store is located (failing with
/// `CookieDbNotFound`) and its values are merged over `supplied`, with
/// empty fields already replaced by the defaults. A store that exists but
/// cannot be read yields `CookiesUnavailable`; callers decide whether to
/// carry on with `supplied.or_defaults()`.
pub fn resolve(supplied: Credentials, lookup: &CookieLookup<'_>) -> WrapperResult<Credentials> {
    if supplied.is_complete() {
        debug!("using supplied csrf token and session id");
        return Ok(supplied);
    }

    let db_file = match lookup.db_path {
        Some(path) => cookie_store::check_db_path(path)?,
        None => cookie_store::find_cookies_db(&cookie_store::default_profile_dirs())?,
    };
    info!("reading cookies from {}", db_file.display());

    let cookies = cookie_store::read_cookies(&db_file, lookup.host, lookup.scratch_dir)?;
    debug!("found {} cookies for {}", cookies.len(), lookup.host);

    Ok(supplied.or_defaults().merged_with(&cookies))
}
