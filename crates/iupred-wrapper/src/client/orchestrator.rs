//! Two-phase request exchange with the IUPred3 service.
//!
//! Phase one submits every sequence to `/plot` at once and waits for all of
//! the HTML responses. Phase two fetches `/raw_json<id>` for every
//! identifier scraped from those pages, again all at once. Results keep the
//! input order because both batches preserve submission order; sequences
//! whose page carried no identifier are skipped.

use tracing::{debug, info, warn};

use crate::client::extract::extract_result_id;
use crate::client::http_client::{Form, HttpResponse, HttpSession};
use crate::config::ServiceConfig;
use crate::credentials::Credentials;
use crate::error::{WrapperError, WrapperResult};
use crate::types::ResultDocument;

/// Drives both request phases over one shared session.
pub struct Orchestrator {
    config: ServiceConfig,
    credentials: Credentials,
    session: HttpSession,
}

impl Orchestrator {
    pub fn new(
        config: ServiceConfig,
        credentials: Credentials,
        user_agent: &str,
    ) -> WrapperResult<Self> {
        let session = HttpSession::new(&credentials, user_agent)?;
        Ok(Self {
            config,
            credentials,
            session,
        })
    }

    /// Submission payload for one sequence. The service wants every field
    /// present, and the CSRF token repeated in the body.
    fn submission_form(&self, sequence: &str) -> Form {
        vec![
            ("email", String::new()),
            ("accession", String::new()),
            ("inp_seq", sequence.to_string()),
            ("aln_file", String::new()),
            ("csrfmiddlewaretoken", self.credentials.csrf_token.clone()),
        ]
    }

    /// Run both phases and return one result per sequence that produced an
    /// identifier, in input order.
    ///
    /// Any transport error, in either phase, or any unparsable result body
    /// fails the whole run.
    pub async fn predict(&self, sequences: &[String]) -> WrapperResult<Vec<ResultDocument>> {
        if sequences.is_empty() {
            return Ok(Vec::new());
        }

        info!("Submitting {} sequences", sequences.len());
        let forms = sequences.iter().map(|s| self.submission_form(s)).collect();
        let pages = self
            .session
            .post_form_many(&self.config.plot_url(), forms)
            .await
            .into_iter()
            .collect::<WrapperResult<Vec<HttpResponse>>>()?;

        let urls = self.result_urls(&pages);
        if urls.is_empty() {
            warn!("no submission returned a result identifier");
            return Ok(Vec::new());
        }

        info!("Fetching {} results", urls.len());
        let bodies = self
            .session
            .get_many(&urls)
            .await
            .into_iter()
            .collect::<WrapperResult<Vec<HttpResponse>>>()?;

        bodies.iter().map(parse_result).collect()
    }

    /// Follow-up URLs for every page that carries a result identifier.
    fn result_urls(&self, pages: &[HttpResponse]) -> Vec<String> {
        pages
            .iter()
            .enumerate()
            .filter_map(|(i, page)| match extract_result_id(&page.body) {
                Some(id) => {
                    debug!("sequence #{} -> result {id}", i + 1);
                    Some(self.config.raw_json_url(&id))
                }
                None => {
                    warn!(
                        "sequence #{} skipped: no result identifier in response (HTTP {})",
                        i + 1,
                        page.status
                    );
                    None
                }
            })
            .collect()
    }
}

/// Decode one result body.
fn parse_result(resp: &HttpResponse) -> WrapperResult<ResultDocument> {
    serde_json::from_str(&resp.body).map_err(|source| WrapperError::MalformedResult {
        url: resp.url.clone(),
        source,
    })
}
