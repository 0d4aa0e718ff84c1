use std::sync::Arc;

use haunted_client::api::{NoCsrfToken, StaticCsrfToken};
use haunted_client::schema::{ChangeUsernameRequest, LoginRequest, SuccessResponse};
use haunted_client::{ApiClient, ApiError, ClientConfig, UploadFile, Violation};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&server.uri()).unwrap()
}

fn login() -> LoginRequest {
    LoginRequest {
        username: "player".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn login_returns_success_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let reply = client.login(&login()).await.unwrap();
    assert_eq!(
        reply,
        SuccessResponse {
            message: String::new(),
            success: true,
        }
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "username": "player", "password": "secret" }));
}

#[tokio::test]
async fn business_failure_is_data_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials",
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let reply = client.login(&login()).await.unwrap();
    assert!(!reply.success);
    assert_eq!(reply.message, "Invalid credentials");
}

#[tokio::test]
async fn static_token_is_sent_as_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/tags"))
        .and(header("X-CSRFToken", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tags": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_token_source(
        config(&server),
        Arc::new(StaticCsrfToken("tok123".into())),
    )
    .unwrap();
    let tags = client.get_tags().await.unwrap();
    assert!(tags.tags.is_empty());
}

#[tokio::test]
async fn no_token_means_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/ghosts/quota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "current": 3, "max": 10 })))
        .mount(&server)
        .await;

    let client = ApiClient::with_token_source(config(&server), Arc::new(NoCsrfToken)).unwrap();
    let quota = client.get_ghosts_quota().await.unwrap();
    assert_eq!((quota.current, quota.max), (3, 10));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-csrftoken").is_none());
}

#[tokio::test]
async fn csrf_cookie_is_echoed_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/auth/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=fromcookie; Path=/")
                .set_body_json(json!({
                    "auth_token": null,
                    "authenticated": false,
                    "email": null,
                    "is_staff": false,
                    "username": "anonymous",
                    "verified": false,
                })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v0/auth/login"))
        .and(header("X-CSRFToken", "fromcookie"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let profile = client.get_profile().await.unwrap();
    assert!(!profile.authenticated);
    assert_eq!(profile.auth_token, None);

    assert!(client.login(&login()).await.unwrap().success);
}

#[tokio::test]
async fn invalid_request_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let err = client
        .change_username(&ChangeUsernameRequest {
            username: String::new(),
        })
        .await
        .unwrap_err();

    let schema = err.schema_error().unwrap();
    assert_eq!(schema.path, "ChangeUsernameRequest.username");
    assert_eq!(schema.violation, Violation::TooShort);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_response_reports_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [{
                "description": "",
                "id": "s1",
                "owner": "ghost",
                "players": [],
                "private": false,
                "tags": [],
                "time": { "start": "2024-01-01T18:00:00Z" },
            }]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let err = client.get_sessions().await.unwrap_err();
    match err {
        ApiError::Schema(schema) => {
            assert_eq!(schema.path, "SessionsResponse.sessions[0].time.end");
            assert_eq!(schema.violation, Violation::Undefined);
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_session_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/sessions/no%20such"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session": null })))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let reply = client.get_session("no such").await.unwrap();
    assert!(reply.session.is_none());
}

#[tokio::test]
async fn non_json_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/server-info"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let err = client.get_server_info().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn upload_sends_all_files_in_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/ghosts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "2 uploaded" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let files = [
        UploadFile::new("first.tar.xz", b"one".to_vec()),
        UploadFile::new("second.tar.xz", b"two".to_vec()),
    ];
    let reply = client.upload_ghosts(&files).await.unwrap();
    assert!(reply.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"first.tar.xz\"; filename=\"first.tar.xz\""));
    assert!(body.contains("name=\"second.tar.xz\"; filename=\"second.tar.xz\""));
}

#[tokio::test]
async fn download_returns_bundle_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/ghosts/7/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xfd, b'7', b'z']))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    let bundle = client.download_ghost(7).await.unwrap().unwrap();
    assert_eq!(bundle.as_ref(), &[0xfd, b'7', b'z']);
}

#[tokio::test]
async fn missing_download_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/ghosts/8/download"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/ghosts/9/download"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server)).unwrap();
    assert!(client.download_ghost(8).await.unwrap().is_none());
    assert!(client.download_ghost(9).await.unwrap().is_none());
}
