//! End-to-end behaviour of `POST /query`.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

const CATEGORIES: &str = r#"{"query":"{ categories { id name } }"}"#;

#[tokio::test]
async fn anonymous_request_is_relayed_without_authorization() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":{"categories":[]}}"#).await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .header("content-type", "application/json")
        .body(CATEGORIES)
        .send()
        .await
        .expect("Relay unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"data":{"categories":[]}}"#);

    let seen = recorder.last();
    assert!(seen.authorization.is_empty(), "no token must be fabricated");
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert_eq!(seen.body_str(), CATEGORIES);
}

#[tokio::test]
async fn bearer_token_is_forwarded_and_401_mirrored() {
    let (upstream, recorder) =
        common::start_fixed_upstream(401, r#"{"errors":[{"message":"unauthenticated"}]}"#).await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .header("authorization", "Bearer abc123")
        .header("content-type", "application/json")
        .body(CATEGORIES)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await.unwrap(), r#"{"errors":[{"message":"unauthenticated"}]}"#);
    assert_eq!(recorder.last().authorization, vec!["Bearer abc123"]);
}

#[tokio::test]
async fn authorization_value_is_not_normalised() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":null}"#).await;
    let relay = common::start_relay(&upstream).await;

    for value in ["bearer   lower-case", "Basic dXNlcjpwYXNz", "Bearer"] {
        common::client()
            .post(relay.url("/query"))
            .header("authorization", value)
            .body(CATEGORIES)
            .send()
            .await
            .unwrap();
        assert_eq!(recorder.last().authorization, vec![value]);
    }
}

#[tokio::test]
async fn upstream_status_and_body_are_mirrored() {
    let cases: [(u16, &'static str); 4] = [
        (200, r#"{"data":{"cart":{"id":"c1","total":12.50}}}"#),
        (400, r#"{"errors":[{"message":"Syntax Error: Unexpected Name"}]}"#),
        (401, r#"{"errors":[{"message":"unauthenticated"}]}"#),
        (500, r#"{"errors":[{"message":"boom","extensions":{"code":"UPSTREAM"}}],"data":null}"#),
    ];

    for (status, body) in cases {
        let (upstream, recorder) = common::start_fixed_upstream(status, body).await;
        let relay = common::start_relay(&upstream).await;

        let res = common::client()
            .post(relay.url("/query"))
            .body(CATEGORIES)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), status);
        assert_eq!(res.text().await.unwrap(), body);
        assert_eq!(recorder.count(), 1, "status {status} must not be retried");
    }
}

#[tokio::test]
async fn graphql_errors_inside_a_200_pass_through() {
    let body = r#"{"data":{"product":null},"errors":[{"message":"not found","path":["product"]}]}"#;
    let (upstream, _) = common::start_fixed_upstream(200, body).await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .body(r#"{"query":"{ product(id: 1) { id } }"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), body);
}

#[tokio::test]
async fn query_and_variables_reach_upstream_byte_identical() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":{}}"#).await;
    let relay = common::start_relay(&upstream).await;

    let inbound = r#"{"variables":{"input":{"qty":2,"price":1.50,"z":null,"a":"é"}},"query":"mutation AddToCart($input: CartInput!) {\n  addToCart(input: $input) { id }\n}","operationName":"AddToCart"}"#;

    common::client()
        .post(relay.url("/query"))
        .header("content-type", "application/json")
        .body(inbound)
        .send()
        .await
        .unwrap();

    let expected = r#"{"query":"mutation AddToCart($input: CartInput!) {\n  addToCart(input: $input) { id }\n}","variables":{"input":{"qty":2,"price":1.50,"z":null,"a":"é"}}}"#;
    assert_eq!(recorder.last().body_str(), expected);
}

#[tokio::test]
async fn malformed_body_is_forwarded_and_rejection_relayed() {
    let rejection = r#"{"errors":[{"message":"Must provide query string."}]}"#;
    let (upstream, recorder) = common::start_fixed_upstream(400, rejection).await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .body("{ this is not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), rejection);
    assert_eq!(recorder.last().body_str(), "{ this is not json");
}

async fn assert_forward_failure(res: reqwest::Response) {
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "errors": [{
                "message": "Failed to forward request to backend",
                "extensions": { "code": "INTERNAL_SERVER_ERROR" }
            }]
        })
    );
}

#[tokio::test]
async fn unreachable_upstream_yields_single_synthetic_error() {
    let upstream = common::unreachable_upstream().await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .header("authorization", "Bearer abc123")
        .body(CATEGORIES)
        .send()
        .await
        .unwrap();

    assert_forward_failure(res).await;
}

#[tokio::test]
async fn non_json_upstream_body_yields_synthetic_error() {
    let (upstream, recorder) = common::start_fixed_upstream(502, "<html>Bad Gateway</html>").await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client()
        .post(relay.url("/query"))
        .body(CATEGORIES)
        .send()
        .await
        .unwrap();

    assert_forward_failure(res).await;
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn request_id_is_assigned_and_preserved() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":{}}"#).await;
    let relay = common::start_relay(&upstream).await;
    let client = common::client();

    let res = client.post(relay.url("/query")).body(CATEGORIES).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok(), "got {generated}");

    let res = client
        .post(relay.url("/query"))
        .header("x-request-id", "req-42")
        .body(CATEGORIES)
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-42");
    assert_eq!(recorder.count(), 2);
}

#[tokio::test]
async fn only_post_is_routed_to_the_relay() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":{}}"#).await;
    let relay = common::start_relay(&upstream).await;

    let res = common::client().get(relay.url("/query")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = common::client().post(relay.url("/graphql")).body(CATEGORIES).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn oversized_body_is_rejected_before_forwarding() {
    let (upstream, recorder) = common::start_fixed_upstream(200, r#"{"data":{}}"#).await;
    let mut config = common::config_for(&upstream);
    config.security.max_body_size = 64;
    let relay = common::start_relay_with(config).await;

    let big = format!(r#"{{"query":"{}"}}"#, "x".repeat(1024));
    let res = common::client()
        .post(relay.url("/query"))
        .body(big)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(recorder.count(), 0);
}
