//! Service configuration, loaded once at process start.
//!
//! Everything here is immutable after construction. The only runtime
//! override is `IUPRED_BASE_URL`, which points the client at another host
//! (a local mock server in tests, a mirror otherwise).

use rand::seq::SliceRandom;
use url::Url;

use crate::error::WrapperResult;

/// Public IUPred3 web service root.
pub const BASE_URL: &str = "https://iupred3.elte.hu";

/// Host value stored in Firefox's `moz_cookies.host` column for the service.
pub const COOKIE_HOST: &str = "iupred3.elte.hu";

/// Fallback CSRF token. Expected to expire; never validated.
pub const DEFAULT_TOKEN: &str = "C3rTEMDtjNTenW68kmmmea0WFv3mLrcCKmQKftdy8hRFF7sHZGPiEvAgx2zaaoB9";

/// Fallback session id. Expected to expire; never validated.
pub const DEFAULT_SESSION_ID: &str = "x7w0cxzvzueyvhtu1ma9yt2nph81wt9y";

/// Firefox profile roots searched for `cookies.sqlite`, in order.
pub const FIREFOX_PROFILE_DIRS: &[&str] = &[
    "~/snap/firefox/common/.mozilla/firefox/",
    "~/.mozilla/firefox/",
];

/// User agents picked at random for each run.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/4.0 (compatible; MSIE 9.0; Windows NT 6.1)",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; WOW64; Trident/5.0)",
    "Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (Windows NT 6.2; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.0; Trident/5.0)",
    "Mozilla/5.0 (Windows NT 6.3; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; WOW64; Trident/6.0)",
    "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; Trident/6.0)",
    "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 5.1; Trident/4.0; .NET CLR 2.0.50727; .NET CLR 3.0.4506.2152; .NET CLR 3.5.30729)",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:59.0) Gecko/20100101 Firefox/59.0",
];

/// Where and how to reach the prediction service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service root, without trailing slash.
    pub base_url: String,
    /// Host filter for the cookie store lookup.
    pub cookie_host: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            cookie_host: COOKIE_HOST.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Build a config for an explicit service root.
    pub fn with_base_url(base_url: &str) -> WrapperResult<Self> {
        // Parse only to reject garbage early; the string form is what we join on.
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    /// Resolve the service root: explicit value, then `IUPRED_BASE_URL`, then default.
    pub fn resolve(explicit: Option<&str>) -> WrapperResult<Self> {
        if let Some(url) = explicit {
            return Self::with_base_url(url);
        }

        if let Ok(env_url) = std::env::var("IUPRED_BASE_URL") {
            if !env_url.is_empty() {
                return Self::with_base_url(&env_url);
            }
        }

        Ok(Self::default())
    }

    /// Submission endpoint.
    pub fn plot_url(&self) -> String {
        format!("{}/plot", self.base_url)
    }

    /// Result endpoint for an identifier scraped from a submission response.
    /// The identifier carries its own leading `%`.
    pub fn raw_json_url(&self, id: &str) -> String {
        format!("{}/raw_json{id}", self.base_url)
    }
}

/// Pick a user agent for this run.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}
