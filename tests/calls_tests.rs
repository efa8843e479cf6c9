use voxhub_rs::Client;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn create_forwards_the_phone_number_verbatim() {
    let server = MockServer::start().await;
    // The number keeps its country code prefix exactly as given; the SDK
    // performs no normalization.
    Mock::given(method("POST"))
        .and(path("/calls"))
        .and(query_param("phoneNumber", "+15550100200"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "queued", "call_sid": "c-1" })),
        )
        .mount(&server)
        .await;

    let client = Client::with_base_url("test-key", server.uri()).unwrap();
    let response = client.calls().create("+15550100200", None).await.unwrap();

    assert_eq!(response["status"], "queued");
}

#[tokio::test]
async fn create_with_an_agent_adds_the_agent_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calls"))
        .and(query_param("phoneNumber", "555-010-0200"))
        .and(query_param("agent_id", "agent-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "queued" })))
        .mount(&server)
        .await;

    let client = Client::with_base_url("test-key", server.uri()).unwrap();
    client.calls().create("555-010-0200", Some("agent-1")).await.unwrap();
}

#[tokio::test]
async fn conference_sends_numbers_and_optional_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calls/conference"))
        .and(body_json(serde_json::json!({
            "to_numbers": ["+15550100200", "+15550100201"],
            "conference_name": "standup"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "started" })))
        .mount(&server)
        .await;

    let client = Client::with_base_url("test-key", server.uri()).unwrap();
    let numbers = vec!["+15550100200".to_string(), "+15550100201".to_string()];
    let response = client
        .calls()
        .initiate_conference(&numbers, Some("standup"))
        .await
        .unwrap();

    assert_eq!(response["status"], "started");
}

#[tokio::test]
async fn conference_omits_the_name_when_not_given() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calls/conference"))
        .and(body_json(serde_json::json!({ "to_numbers": ["+15550100200"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "started" })))
        .mount(&server)
        .await;

    let client = Client::with_base_url("test-key", server.uri()).unwrap();
    let numbers = vec!["+15550100200".to_string()];
    client.calls().initiate_conference(&numbers, None).await.unwrap();
}
