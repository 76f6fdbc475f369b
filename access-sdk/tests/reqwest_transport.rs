//! ReqwestTransport against a local mock server

use access_sdk::{
    HttpMethod, HttpRequest, HttpTransport, RequestParameters, ReqwestTransport, TransportConfig,
    TransportError,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHORIZATION: &str = "Basic OTk5OTk5OnZhbGlka2V5";

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&TransportConfig::default()).unwrap()
}

#[tokio::test]
async fn test_post_sends_headers_and_form_body() {
    let server = MockServer::start().await;

    let mut params = RequestParameters::new();
    params.push("v", "0320");
    params.push("s", "askhjdaskdgjhagkjhasg47862345shg");
    params.push("note", "a b&c");
    let body = params.to_form_body();

    Mock::given(method("POST"))
        .and(path("/api/velocity"))
        .and(header("Authorization", AUTHORIZATION))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"response_id":"x"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let request = HttpRequest {
        method: HttpMethod::Post,
        url: format!("{}/api/velocity", server.uri()),
        headers: vec![
            ("Authorization".to_string(), AUTHORIZATION.to_string()),
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ),
        ],
        body: Some(body),
    };

    let response = transport().execute(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_deref(), Some(r#"{"response_id":"x"}"#));
}

#[tokio::test]
async fn test_get_sends_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .and(query_param("v", "0320"))
        .and(query_param("s", "askhjdaskdgjhagkjhasg47862345shg"))
        .and(header("Authorization", AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let request = HttpRequest {
        method: HttpMethod::Get,
        url: format!(
            "{}/api/device?v=0320&s=askhjdaskdgjhagkjhasg47862345shg",
            server.uri()
        ),
        headers: vec![("Authorization".to_string(), AUTHORIZATION.to_string())],
        body: None,
    };

    let response = transport().execute(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_deref(), Some("{}"));
}

#[tokio::test]
async fn test_error_status_is_reported_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = HttpRequest {
        method: HttpMethod::Post,
        url: format!("{}/api/decision", server.uri()),
        headers: Vec::new(),
        body: Some("v=0320".to_string()),
    };

    let response = transport().execute(request).await.unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.reason, "Internal Server Error");
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn test_empty_body_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/devicetrust"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let request = HttpRequest {
        method: HttpMethod::Post,
        url: format!("{}/api/devicetrust", server.uri()),
        headers: Vec::new(),
        body: Some("v=0320&ts=trusted".to_string()),
    };

    let response = transport().execute(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, None);
}

#[tokio::test]
async fn test_connection_refused_is_io() {
    let request = HttpRequest {
        method: HttpMethod::Get,
        url: "http://127.0.0.1:1/api/device".to_string(),
        headers: Vec::new(),
        body: None,
    };

    let err = transport().execute(request).await.unwrap_err();
    assert!(matches!(err, TransportError::Io(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unresolvable_host_is_not_invalid_url() {
    let request = HttpRequest {
        method: HttpMethod::Get,
        url: "http://access-sdk-test.invalid/api/device".to_string(),
        headers: Vec::new(),
        body: None,
    };

    // Sandboxed resolvers may fail without a recognisable DNS message.
    let err = transport().execute(request).await.unwrap_err();
    assert!(
        matches!(err, TransportError::UnknownHost(_) | TransportError::Io(_)),
        "{:?}",
        err
    );
}
