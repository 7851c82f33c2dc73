mod common;

use common::{acme_results, client_for, company, settings_for, shown};
use crm_company_search::config::{MapVariables, VariableNames, VariableProvider};
use crm_company_search::display::MemorySink;
use crm_company_search::{
    Configuration, DisplayStatus, ErrorKind, SearchOutcome, SearchSession, TransportMode,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer, config: Configuration) -> (SearchSession, MemorySink) {
    let client = client_for(&settings_for(server));
    let sink = MemorySink::new();
    let session = SearchSession::new(config, Arc::new(client), Arc::new(sink.clone()));
    (session, sink)
}

#[tokio::test]
async fn search_renders_rows_and_counter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_results()))
        .mount(&server)
        .await;

    let (session, sink) = session_for(&server, Configuration::direct("pat-test"));
    assert_eq!(shown(&session.submit_search("Acme").await), Some(2));

    let snap = sink.snapshot();
    assert_eq!(snap.count_label(), "2 companies");
    assert_eq!(snap.rows[1].phone, "N/A");
    assert_eq!(snap.history, vec![DisplayStatus::Loading, DisplayStatus::Idle]);

    let submission = session.submission();
    assert_eq!(submission.search_term, "Acme");
    assert_eq!(submission.total_records, 2);
}

#[tokio::test]
async fn server_error_moves_from_loading_to_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (session, sink) = session_for(&server, Configuration::direct("pat-test"));
    let outcome = session.submit_search("Acme").await;
    assert!(matches!(outcome, SearchOutcome::Failed(ref e) if e.kind() == ErrorKind::Remote));

    let snap = sink.snapshot();
    assert_eq!(snap.history.len(), 2);
    assert_eq!(snap.history[0], DisplayStatus::Loading);
    match &snap.status {
        DisplayStatus::Error(message) => assert!(message.contains("500")),
        other => panic!("expected error status, got {:?}", other),
    }
    assert!(snap.rows.is_empty());
}

#[tokio::test]
async fn later_search_wins_over_slow_earlier_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hubspot/companies/search"))
        .and(body_partial_json(json!({"searchTerm": "slow"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [company("1", json!({"name": "Slow Co"}))]}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hubspot/companies/search"))
        .and(body_partial_json(json!({"searchTerm": "fast"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [company("2", json!({"name": "Fast Co"}))]})),
        )
        .mount(&server)
        .await;

    let (session, sink) = session_for(&server, Configuration::relayed(server.uri(), "relay"));

    let (slow, fast) = futures::join!(session.submit_search("slow"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.submit_search("fast").await
    });

    assert_eq!(slow, SearchOutcome::Superseded);
    assert_eq!(shown(&fast), Some(1));

    let snap = sink.snapshot();
    assert_eq!(snap.rows.len(), 1);
    assert_eq!(snap.rows[0].name, "Fast Co");
    assert_eq!(snap.status, DisplayStatus::Idle);
    assert_eq!(session.current_term().as_deref(), Some("fast"));
}

#[tokio::test]
async fn reload_picks_up_host_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hubspot/companies/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (session, sink) = session_for(&server, Configuration::default());
    let outcome = session.submit_search("Acme").await;
    assert!(
        matches!(outcome, SearchOutcome::Failed(ref e) if e.kind() == ErrorKind::Configuration)
    );
    assert!(!sink.snapshot().history.contains(&DisplayStatus::Loading));

    let host = MapVariables::new()
        .with("HubSpotAPIToken", "relay-token")
        .with("HubSpotBackendURL", server.uri());
    session.reload_configuration(&host, VariableNames::default());

    let config = session.configuration();
    assert!(config.is_configured);
    assert_eq!(config.transport_mode, TransportMode::Relayed);

    assert_eq!(shown(&session.submit_search("Acme").await), Some(0));
    assert_eq!(sink.snapshot().count_label(), "0 companies");
}

#[tokio::test]
async fn clear_resets_rows_and_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acme_results()))
        .mount(&server)
        .await;

    let (session, sink) = session_for(&server, Configuration::direct("pat-test"));
    session.submit_search("Acme").await;
    session.clear();

    let snap = sink.snapshot();
    assert!(snap.rows.is_empty());
    assert_eq!(snap.count_label(), "0 companies");
    assert_eq!(snap.status, DisplayStatus::Idle);

    let host = MapVariables::new();
    let submission = session.submission();
    assert!(submission.publish(&host, "Submission"));
    let stored: serde_json::Value =
        serde_json::from_str(&host.get("Submission").unwrap()).unwrap();
    assert_eq!(stored["totalRecords"], 0);
    assert_eq!(stored["companies"], json!([]));
}
