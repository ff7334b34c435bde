use std::time::Duration;

use gallery_engine::{CatApiSource, FailureKind, FeedSource, FetchSettings};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_BODY: &str = r#"[
    {"id":"a1","url":"https://cdn.example/a1.jpg","width":640,"height":480,"breeds":[{"name":"Bengal"}]},
    {"id":"b2","url":"https://cdn.example/b2.jpg","width":800,"height":600,"breeds":[]}
]"#;

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn source_returns_images_in_response_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("order", "RANDOM"))
        .and(query_param("mime_types", "jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
        .mount(&server)
        .await;

    let source = CatApiSource::new(settings_for(&server));
    let images = source.fetch_page(2).await.expect("fetch ok");

    let urls: Vec<&str> = images.iter().map(|image| image.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://cdn.example/a1.jpg", "https://cdn.example/b2.jpg"]
    );
    assert_eq!(images[0].id, "a1");
    assert_eq!(images[1].width, Some(800));
}

#[tokio::test]
async fn source_sends_api_key_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        api_key: Some("secret".to_string()),
        ..settings_for(&server)
    };
    let images = CatApiSource::new(settings).fetch_page(0).await.expect("fetch ok");
    assert!(images.is_empty());
}

#[tokio::test]
async fn source_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = CatApiSource::new(settings_for(&server))
        .fetch_page(1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn source_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"message":"nope"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = CatApiSource::new(settings_for(&server))
        .fetch_page(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("[]"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let err = CatApiSource::new(settings).fetch_page(0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn source_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/images/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..settings_for(&server)
    };
    let err = CatApiSource::new(settings).fetch_page(0).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn source_reports_network_failure() {
    let settings = FetchSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..FetchSettings::default()
    };
    let err = CatApiSource::new(settings).fetch_page(0).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
