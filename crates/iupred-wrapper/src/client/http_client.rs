//! Async HTTP session wrapping reqwest.
//!
//! One `reqwest::Client` carries the connection pool and default headers for
//! a whole run. No retries and no per-request timeouts: a stalled request
//! stalls its batch.

use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, COOKIE};

use crate::credentials::Credentials;
use crate::error::WrapperResult;

/// Response from a GET or POST, body already read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Form fields of a single submission.
pub type Form = Vec<(&'static str, String)>;

/// HTTP session shared by every request of a run.
#[derive(Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    cookie_header: HeaderValue,
}

impl HttpSession {
    /// Create a session that presents `credentials` as cookies and sends
    /// `user_agent` on every request.
    pub fn new(credentials: &Credentials, user_agent: &str) -> WrapperResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        // Requests without the session cookies are rejected by the service.
        let cookie_header = HeaderValue::from_str(&credentials.cookie_header())?;

        Ok(Self {
            client,
            cookie_header,
        })
    }

    /// POST url-encoded form data.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, String)],
    ) -> WrapperResult<HttpResponse> {
        let r = self
            .client
            .post(url)
            .header(COOKIE, self.cookie_header.clone())
            .form(form)
            .send()
            .await?;

        let status = r.status().as_u16();
        let body = r.text().await?;

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> WrapperResult<HttpResponse> {
        let r = self
            .client
            .get(url)
            .header(COOKIE, self.cookie_header.clone())
            .send()
            .await?;

        let status = r.status().as_u16();
        let body = r.text().await?;

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// POST every form to `url` concurrently.
    ///
    /// All requests are in flight at once and the returned vector is in the
    /// same order as `forms`, whatever order responses arrive in.
    pub async fn post_form_many(
        &self,
        url: &str,
        forms: Vec<Form>,
    ) -> Vec<WrapperResult<HttpResponse>> {
        let width = forms.len().max(1);

        stream::iter(forms)
            .map(|form| {
                let session = self.clone();
                let u = url.to_string();
                async move { session.post_form(&u, &form).await }
            })
            .buffered(width)
            .collect()
            .await
    }

    /// GET every URL concurrently, results in input order.
    pub async fn get_many(&self, urls: &[String]) -> Vec<WrapperResult<HttpResponse>> {
        let width = urls.len().max(1);

        stream::iter(urls.iter())
            .map(|url| {
                let session = self.clone();
                let u = url.clone();
                async move { session.get(&u).await }
            })
            .buffered(width)
            .collect()
            .await
    }
}
