use mempool_dashboard::{
    fee_distribution::{FeeSample, FeeTarget},
    mempool_client::{FeeFetcher, FetchError, MempoolSpaceClient},
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::init_tracing;

#[tokio::test]
async fn fees_by_height_reads_the_confirmed_block_endpoint() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/height/800000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"fpv": 1.5}, {"fpv": 12.0}, {"fpv": 40.2}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = MempoolSpaceClient::new(server.uri());
    let samples = client
        .fetch(FeeTarget::Height(800_000))
        .await
        .expect("Fee request failed");

    let rates: Vec<f64> = samples.iter().map(|sample| sample.fee_rate).collect();
    assert_eq!(rates, vec![1.5, 12.0, 40.2]);
}

#[tokio::test]
async fn fees_by_projected_index_reads_the_projected_endpoint() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/projected/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"fpv": 3.0}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = MempoolSpaceClient::new(server.uri());
    let samples = client
        .fetch(FeeTarget::Projected(2))
        .await
        .expect("Fee request failed");

    assert_eq!(samples, vec![FeeSample::from(3.0)]);
}

#[tokio::test]
async fn error_status_is_reported() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = MempoolSpaceClient::new(server.uri());
    let result = client.fees_by_height(1).await;

    assert!(matches!(
        result,
        Err(FetchError::Status(StatusCode::NOT_FOUND))
    ));
}

#[tokio::test]
async fn malformed_body_is_a_request_error() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = MempoolSpaceClient::new(server.uri());
    let result = client.fees_by_projected_index(0).await;

    assert!(matches!(result, Err(FetchError::Request(_))));
}
