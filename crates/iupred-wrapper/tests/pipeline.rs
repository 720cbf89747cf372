//! End-to-end tests of the two-phase exchange against a mock IUPred3 service.

use std::time::Duration;

use iupred_wrapper::client::Orchestrator;
use iupred_wrapper::config::ServiceConfig;
use iupred_wrapper::credentials::Credentials;
use iupred_wrapper::render;
use iupred_wrapper::WrapperError;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── helpers ───────────────────────

fn plot_page(id: &str) -> String {
    format!(
        "<html>\n<body>\n<h1>IUPred3 results</h1>\n    <a class=\"btn\" href=\"/raw_json{id}\">Download JSON</a>\n</body>\n</html>\n"
    )
}

fn expired_page() -> String {
    "<html>\n<body>\n<p>Your session has expired.</p>\n</body>\n</html>\n".to_string()
}

fn result_json(sequence: &str, scores: &[f64]) -> serde_json::Value {
    json!({ "sequence": sequence, "iupred2": scores, "anchor2": scores })
}

async fn mount_submission(server: &MockServer, sequence: &str, body: String) {
    Mock::given(method("POST"))
        .and(path("/plot"))
        .and(body_string_contains(format!("inp_seq={sequence}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_result(server: &MockServer, id: &str, doc: serde_json::Value, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/raw_json{id}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(doc)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn orchestrator(server: &MockServer) -> Orchestrator {
    let config = ServiceConfig::with_base_url(&server.uri()).unwrap();
    Orchestrator::new(config, Credentials::new("xyz", "abc"), "test-agent/1.0").unwrap()
}

fn sequences(seqs: &[&str]) -> Vec<String> {
    seqs.iter().map(|s| s.to_string()).collect()
}

// ─────────────────────── tests ───────────────────────

#[tokio::test]
async fn test_malformed_submission_drops_only_that_sequence() {
    let server = MockServer::start().await;
    mount_submission(&server, "MSEQONE", plot_page("%AB12CD")).await;
    mount_submission(&server, "MSEQTWO", expired_page()).await;
    mount_submission(&server, "MSEQTHREE", plot_page("%CD34EF")).await;
    mount_result(
        &server,
        "%AB12CD",
        result_json("MSEQONE", &[0.9, 0.1, 0.5, 0.6, 0.2, 0.8, 0.51]),
        0,
    )
    .await;
    mount_result(
        &server,
        "%CD34EF",
        result_json("MSEQTHREE", &[0.0, 0.0, 0.0, 0.7, 0.7, 0.7, 0.0, 0.0, 0.0]),
        0,
    )
    .await;

    let results = orchestrator(&server)
        .predict(&sequences(&["MSEQONE", "MSEQTWO", "MSEQTHREE"]))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sequence, "MSEQONE");
    assert_eq!(results[1].sequence, "MSEQTHREE");
    for r in &results {
        assert_eq!(r.scores.len(), r.sequence.len());
    }
    assert_eq!(render::render(&results[0]), "MSEQONE\nD--D-DD");
    assert_eq!(render::render(&results[1]), "MSEQTHREE\n---DDD---");
}

#[tokio::test]
async fn test_results_keep_input_order_when_responses_arrive_out_of_order() {
    let server = MockServer::start().await;
    mount_submission(&server, "MAAA", plot_page("%AA01")).await;
    mount_submission(&server, "MBBB", plot_page("%BB02")).await;
    mount_result(&server, "%AA01", result_json("MAAA", &[0.9, 0.9, 0.9, 0.9]), 300).await;
    mount_result(&server, "%BB02", result_json("MBBB", &[0.1, 0.1, 0.1, 0.1]), 0).await;

    let results = orchestrator(&server)
        .predict(&sequences(&["MAAA", "MBBB"]))
        .await
        .unwrap();

    let seqs: Vec<&str> = results.iter().map(|r| r.sequence.as_str()).collect();
    assert_eq!(seqs, vec!["MAAA", "MBBB"]);
}

#[tokio::test]
async fn test_submission_carries_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/plot"))
        .and(header("cookie", "csrftoken=xyz; sessionid=abc"))
        .and(header("user-agent", "test-agent/1.0"))
        .and(body_string_contains("csrfmiddlewaretoken=xyz"))
        .and(body_string_contains("inp_seq=MKV"))
        .respond_with(ResponseTemplate::new(200).set_body_string(plot_page("%AB12")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw_json%AB12"))
        .and(header("cookie", "csrftoken=xyz; sessionid=abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(result_json("MKV", &[0.2, 0.7, 0.4])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let results = orchestrator(&server).predict(&sequences(&["MKV"])).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(render::disorder_mask(&results[0].scores), "-D-");
}

#[tokio::test]
async fn test_no_identifiers_means_no_result_requests() {
    let server = MockServer::start().await;
    mount_submission(&server, "MONE", expired_page()).await;
    mount_submission(&server, "MTWO", expired_page()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let results = orchestrator(&server)
        .predict(&sequences(&["MONE", "MTWO"]))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_malformed_result_fails_the_run() {
    let server = MockServer::start().await;
    mount_submission(&server, "MONE", plot_page("%AB01")).await;
    mount_submission(&server, "MTWO", plot_page("%AB02")).await;
    mount_result(&server, "%AB01", result_json("MONE", &[0.1, 0.1, 0.1, 0.1]), 0).await;
    Mock::given(method("GET"))
        .and(path("/raw_json%AB02"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Internal error</html>"))
        .mount(&server)
        .await;

    let err = orchestrator(&server)
        .predict(&sequences(&["MONE", "MTWO"]))
        .await
        .unwrap_err();
    assert!(matches!(err, WrapperError::MalformedResult { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    let config = ServiceConfig::with_base_url("http://127.0.0.1:9").unwrap();
    let orchestrator = Orchestrator::new(config, Credentials::new("a", "b"), "ua").unwrap();

    let err = orchestrator.predict(&sequences(&["MKV"])).await.unwrap_err();
    assert!(matches!(err, WrapperError::Http(_)));
}
