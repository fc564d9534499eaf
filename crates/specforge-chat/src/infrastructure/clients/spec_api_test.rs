use mockito::Matcher;
use serde_json::json;

use super::*;

async fn mock_response(
    server: &mut mockito::ServerGuard,
    status: usize,
    body: &str,
) -> mockito::Mock {
    return server
        .mock("POST", GENERATE_SPEC_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "prompt": "build an API" })))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
}

#[tokio::test]
async fn it_returns_the_data_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_response(
        &mut server,
        200,
        r#"{"success": true, "data": {"framework": "Axum"}}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    mock.assert_async().await;
    assert_eq!(res, SpecResponse::Ok(json!({ "framework": "Axum" })));
}

#[tokio::test]
async fn it_accepts_the_spec_payload_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        200,
        r#"{"success": true, "spec": {"stack": {"framework": "NestJS"}}}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(
        res,
        SpecResponse::Ok(json!({ "stack": { "framework": "NestJS" } }))
    );
}

#[tokio::test]
async fn it_surfaces_error_field_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        429,
        r#"{"success": false, "error": "Rate limit exceeded"}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(res, SpecResponse::Error("Rate limit exceeded".to_string()));
}

#[tokio::test]
async fn it_surfaces_message_field_when_error_is_missing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        400,
        r#"{"success": false, "message": "Prompt too long"}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(res, SpecResponse::Error("Prompt too long".to_string()));
}

#[tokio::test]
async fn it_uses_status_reason_for_non_json_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(&mut server, 500, "<html>oops</html>").await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(
        res,
        SpecResponse::Error("Internal Server Error".to_string())
    );
}

#[tokio::test]
async fn it_rejects_success_false() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        200,
        r#"{"success": false, "data": {"framework": "Axum"}, "error": "Model refused"}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(res, SpecResponse::Error("Model refused".to_string()));
}

#[tokio::test]
async fn it_rejects_missing_payload_with_generic_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(&mut server, 200, r#"{"success": true, "data": null}"#).await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(
        res,
        SpecResponse::Error("Failed to generate response".to_string())
    );
}

#[tokio::test]
async fn it_ignores_non_string_message_on_success() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        200,
        r#"{"success": true, "data": {"framework": "Axum"}, "message": {"code": "OK"}}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(res, SpecResponse::Ok(json!({ "framework": "Axum" })));
}

#[tokio::test]
async fn it_skips_non_string_error_when_explaining() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(
        &mut server,
        422,
        r#"{"success": false, "error": {"code": 42}, "message": "Prompt rejected"}"#,
    )
    .await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let res = client.generate_spec("build an API").await.unwrap();

    assert_eq!(res, SpecResponse::Error("Prompt rejected".to_string()));
}

#[tokio::test]
async fn it_fails_on_malformed_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_response(&mut server, 200, "{not json").await;

    let client = SpecApiClient::new(&server.url(), "5000");
    let err = client.generate_spec("build an API").await.unwrap_err();

    assert!(err.to_string().contains("malformed JSON"));
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let client = SpecApiClient::new("http://127.0.0.1:1", "5000");
    assert!(client.generate_spec("build an API").await.is_err());
}

#[tokio::test]
async fn it_fails_on_invalid_timeout() {
    let client = SpecApiClient::new("http://127.0.0.1:1", "soon");
    let err = client.generate_spec("build an API").await.unwrap_err();

    assert!(err.to_string().contains("Invalid timeout"));
}

#[tokio::test]
async fn it_fails_without_url() {
    let client = SpecApiClient::new("", "5000");
    let err = client.generate_spec("build an API").await.unwrap_err();

    assert!(err.to_string().contains("URL is not defined"));
}

#[test]
fn it_builds_the_endpoint_url() {
    let client = SpecApiClient::new("https://example.com/", "5000");
    assert_eq!(
        client.endpoint(),
        "https://example.com/api/v2/generate-spec"
    );
}
