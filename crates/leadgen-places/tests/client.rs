//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use leadgen_places::{PlacesClient, PlacesError, DETAIL_FIELDS};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, "leadgen-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn text_search_returns_candidates_in_api_order() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            {
                "place_id": "p1",
                "name": "Sunrise Bakery",
                "formatted_address": "1 Main St, Springfield",
                "rating": 4.6,
                "user_ratings_total": 120,
                "types": ["bakery", "food", "store"]
            },
            {
                "place_id": "p2",
                "name": "Corner Loaf",
                "formatted_address": "9 Elm St, Springfield"
            }
        ],
        "next_page_token": "ignored"
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "bakery in Springfield"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("bakery", "Springfield")
        .await
        .expect("should parse search results");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].place_id, "p1");
    assert_eq!(results[0].rating, Some(4.6));
    assert_eq!(results[0].user_ratings_total, 120);
    assert_eq!(results[0].types, vec!["bakery", "food", "store"]);
    assert_eq!(results[1].place_id, "p2");
    assert_eq!(results[1].rating, None);
    assert_eq!(results[1].user_ratings_total, 0);
    assert!(results[1].types.is_empty());
}

#[tokio::test]
async fn text_search_zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client.text_search("igloo repair", "Miami").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn text_search_skips_results_without_place_id() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            { "name": "No Identifier" },
            { "place_id": "p9", "name": "Has Identifier" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client.text_search("bakery", "Springfield").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].place_id, "p9");
}

#[tokio::test]
async fn text_search_api_error_status_returns_err() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid.",
        "results": []
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .text_search("bakery", "Springfield")
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("REQUEST_DENIED") && msg.contains("API key is invalid"),
        "unexpected error message: {msg}"
    );
}

#[tokio::test]
async fn text_search_http_500_returns_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .text_search("bakery", "Springfield")
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)), "got: {err:?}");
    assert!(
        !err.to_string().contains("test-key"),
        "error must not leak the API key: {err}"
    );
}

#[tokio::test]
async fn text_search_missing_results_is_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"status": "OK"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .text_search("bakery", "Springfield")
        .await
        .unwrap_err();
    assert!(
        matches!(err, PlacesError::UnexpectedShape { field: "results", .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn text_search_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .text_search("bakery", "Springfield")
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn place_details_requests_fixed_fields_and_parses_result() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "result": {
            "name": "Sunrise Bakery",
            "formatted_address": "1 Main St, Springfield",
            "formatted_phone_number": "(555) 010-2030",
            "website": "https://sunrise.example.com",
            "rating": 4.6,
            "user_ratings_total": 120,
            "business_status": "OPERATIONAL",
            "types": ["bakery"]
        }
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("fields", DETAIL_FIELDS))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.place_details("p1").await.expect("should parse detail");

    assert_eq!(detail.name.as_deref(), Some("Sunrise Bakery"));
    assert_eq!(detail.formatted_phone_number.as_deref(), Some("(555) 010-2030"));
    assert_eq!(detail.website.as_deref(), Some("https://sunrise.example.com"));
    assert_eq!(detail.user_ratings_total, Some(120));
    assert_eq!(detail.business_status.as_deref(), Some("OPERATIONAL"));
}

#[tokio::test]
async fn place_details_without_website_leaves_field_empty() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "result": { "name": "Corner Loaf", "formatted_phone_number": "(555) 999-0000" }
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.place_details("p2").await.unwrap();
    assert!(detail.website.is_none());
    assert!(detail.types.is_empty());
}

#[tokio::test]
async fn place_details_not_found_status_returns_err() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"status": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_details("gone").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiStatus { ref status, .. } if status == "NOT_FOUND"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn place_details_missing_result_is_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"status": "OK"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_details("p1").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::UnexpectedShape { field: "result", .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn text_search_keeps_results_with_null_types() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            { "place_id": "p1" },
            { "place_id": "p2", "types": null, "user_ratings_total": null }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client.text_search("bakery", "Springfield").await.unwrap();
    let ids: Vec<&str> = results.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert!(results[1].types.is_empty());
    assert_eq!(results[1].user_ratings_total, 0);
}

#[tokio::test]
async fn place_details_with_null_types_still_reports_website() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "result": { "website": "https://has-site.example", "types": null }
    });

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client
        .place_details("p1")
        .await
        .expect("null types should not fail the detail record");
    assert_eq!(detail.website.as_deref(), Some("https://has-site.example"));
    assert!(detail.types.is_empty());
}
