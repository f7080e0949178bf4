//! Paginated source fetcher behavior against a mocked collection endpoint.

mod common;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syllabot::canvas::{fetch_all, PAGE_ITEM_CAP};
use syllabot::error::SyllabotError;

fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn follows_next_links_until_exhausted() {
    let server = MockServer::start().await;

    let page = |n: u32| format!("{}/items?page={n}", server.uri());

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"n": 5}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!(r#"<{}>; rel="next""#, page(3)).as_str())
                .set_body_json(json!([{"n": 3}, {"n": 4}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{}>; rel="next", <{}>; rel="last""#, page(2), page(3)).as_str(),
                )
                .set_body_json(json!([{"n": 1}, {"n": 2}])),
        )
        .mount(&server)
        .await;

    let items: Vec<Value> = fetch_all(
        &http_client(),
        "token",
        &format!("{}/items", server.uri()),
        &[("per_page", "2")],
    )
    .await
    .expect("drain succeeds");

    let ns: Vec<i64> = items.iter().map(|i| i["n"].as_i64().expect("n")).collect();
    assert_eq!(ns, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn stops_at_the_item_cap_even_with_more_pages_offered() {
    let server = MockServer::start().await;

    let big_page: Vec<Value> = (0..PAGE_ITEM_CAP).map(|n| json!({"n": n})).collect();
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{}/items?page=2>; rel="next""#, server.uri()).as_str(),
                )
                .set_body_json(json!(big_page)),
        )
        .mount(&server)
        .await;

    let items: Vec<Value> = fetch_all(
        &http_client(),
        "token",
        &format!("{}/items", server.uri()),
        &[],
    )
    .await
    .expect("drain succeeds");

    assert_eq!(items.len(), PAGE_ITEM_CAP);
    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1, "the next link must not be followed");
}

#[tokio::test]
async fn non_collection_page_is_kept_as_single_item() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{}/items?page=2>; rel="next""#, server.uri()).as_str(),
                )
                .set_body_json(json!({"detail": "not a list"})),
        )
        .mount(&server)
        .await;

    let items: Vec<Value> = fetch_all(
        &http_client(),
        "token",
        &format!("{}/items", server.uri()),
        &[],
    )
    .await
    .expect("drain succeeds");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["detail"], "not a list");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetch_all::<Value>(
        &http_client(),
        "token",
        &format!("{}/items", server.uri()),
        &[],
    )
    .await
    .expect_err("fetch error");

    assert!(matches!(err, SyllabotError::Fetch(_)));
}

#[tokio::test]
async fn bearer_token_is_sent_on_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _: Vec<Value> = fetch_all(
        &http_client(),
        "secret-token",
        &format!("{}/items", server.uri()),
        &[],
    )
    .await
    .expect("drain succeeds");

    let requests = server.received_requests().await.expect("recorded requests");
    let auth = requests[0]
        .headers
        .get("authorization")
        .expect("authorization header");
    assert_eq!(auth, "Bearer secret-token");
}
