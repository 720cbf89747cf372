//! `iupred3-wrapper <file>`: predict disorder for every sequence in a FASTA file.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::cli::output::{self, OutputMode};
use crate::client::Orchestrator;
use crate::config::{self, ServiceConfig};
use crate::credentials::{self, CookieLookup, Credentials};
use crate::error::WrapperError;
use crate::fasta;

/// Everything the command needs from the command line.
#[derive(Debug, Clone)]
pub struct PredictOptions {
    pub file: PathBuf,
    pub token: String,
    pub session_id: String,
    pub cookies_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output: OutputMode,
}

/// Resolve credentials, falling back to the supplied values (empty ones
/// replaced by the defaults) when the cookie store exists but cannot be read.
fn credentials_for(
    opts: &PredictOptions,
    service: &ServiceConfig,
) -> Result<Credentials, WrapperError> {
    let supplied = Credentials::new(opts.token.clone(), opts.session_id.clone());
    let scratch = std::env::temp_dir();
    let lookup = CookieLookup {
        db_path: opts.cookies_path.as_deref(),
        host: &service.cookie_host,
        scratch_dir: &scratch,
    };

    match credentials::resolve(supplied.clone(), &lookup) {
        Ok(creds) => Ok(creds),
        Err(e @ WrapperError::CookiesUnavailable(_)) => {
            output::print_error(&e.to_string());
            output::print_causes(&e, opts.output);
            Ok(supplied.or_defaults())
        }
        Err(e) => Err(e),
    }
}

/// Run the prediction pipeline.
pub async fn run(opts: &PredictOptions) -> Result<()> {
    // A missing input fails here, before the cookie store or network is touched.
    info!("Reading sequences from {}", opts.file.display());
    let sequences = fasta::read_sequences(&opts.file)?;

    let service = ServiceConfig::resolve(opts.base_url.as_deref())?;
    let creds = credentials_for(opts, &service)?;

    let orchestrator = Orchestrator::new(service, creds, config::random_user_agent())?;
    let results = orchestrator.predict(&sequences).await?;
    info!("{} of {} sequences predicted", results.len(), sequences.len());

    output::print_results(&results, opts.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SESSION_ID, DEFAULT_TOKEN};

    #[test]
    fn test_unreadable_store_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = dir.path().join("cookies.sqlite");
        std::fs::write(&store, b"garbage").unwrap();

        let opts = PredictOptions {
            file: dir.path().join("in.fasta"),
            token: String::new(),
            session_id: String::new(),
            cookies_path: Some(store),
            base_url: None,
            output: OutputMode::default(),
        };
        let creds = credentials_for(&opts, &ServiceConfig::default()).unwrap();
        assert_eq!(creds, Credentials::new(DEFAULT_TOKEN, DEFAULT_SESSION_ID));

        let opts = PredictOptions {
            session_id: "sid".to_string(),
            ..opts
        };
        let creds = credentials_for(&opts, &ServiceConfig::default()).unwrap();
        assert_eq!(creds, Credentials::new(DEFAULT_TOKEN, "sid"));
    }

    #[tokio::test]
    async fn test_run_missing_input_is_input_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let opts = PredictOptions {
            file: dir.path().join("missing.fasta"),
            token: String::new(),
            session_id: String::new(),
            cookies_path: Some(dir.path().join("missing.sqlite")),
            base_url: None,
            output: OutputMode::default(),
        };
        let err = run(&opts).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WrapperError>(),
            Some(WrapperError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_missing_store_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let opts = PredictOptions {
            file: dir.path().join("in.fasta"),
            token: String::new(),
            session_id: String::new(),
            cookies_path: Some(dir.path().join("missing.sqlite")),
            base_url: None,
            output: OutputMode::default(),
        };
        let err = credentials_for(&opts, &ServiceConfig::default()).unwrap_err();
        assert!(matches!(err, WrapperError::CookieDbNotFound(_)));
    }
}
