use super::*;
use axum::Router;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use serde_json::json;

const TIMEOUTS: BackendTimeouts = BackendTimeouts { request_secs: 5, connect_secs: 2 };

/// Bind a throwaway backend on an ephemeral port and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}/api")
}

fn echo_auth(headers: HeaderMap) -> axum::Json<serde_json::Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    axum::Json(json!({ "authorization": auth }))
}

// =============================================================================
// BackendClient over HTTP
// =============================================================================

#[tokio::test]
async fn get_attaches_bearer_token() {
    let base = spawn_backend(Router::new().route("/api/teams", get(|headers: HeaderMap| async move { echo_auth(headers) })))
        .await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let body = client
        .send(ApiRequest::get("/teams").with_token(Some("abc123")))
        .await
        .unwrap();
    assert_eq!(body["authorization"], "Bearer abc123");
}

#[tokio::test]
async fn get_without_token_sends_no_authorization() {
    let base = spawn_backend(Router::new().route("/api/teams", get(|headers: HeaderMap| async move { echo_auth(headers) })))
        .await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let body = client.send(ApiRequest::get("teams").with_token(Some(""))).await.unwrap();
    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn json_body_is_forwarded() {
    let router = Router::new().route(
        "/api/matches/7/result",
        patch(|axum::Json(body): axum::Json<serde_json::Value>| async move { axum::Json(json!({ "echo": body })) }),
    );
    let base = spawn_backend(router).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let body = client
        .send(ApiRequest::patch("/matches/7/result").json(json!({ "winner": "t1" })))
        .await
        .unwrap();
    assert_eq!(body["echo"]["winner"], "t1");
}

#[tokio::test]
async fn multipart_body_carries_fields_and_files() {
    let router = Router::new().route(
        "/api/teams",
        post(|mut multipart: Multipart| async move {
            let mut seen = Vec::new();
            while let Some(field) = multipart.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_owned();
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.unwrap();
                seen.push(json!({ "name": name, "file": file_name, "len": bytes.len() }));
            }
            axum::Json(json!({ "parts": seen }))
        }),
    );
    let base = spawn_backend(router).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let mut form = UploadForm::new().text("name", "Everest Strikers");
    form.files.push(UploadFile {
        field: "logo".into(),
        file_name: "logo.png".into(),
        content_type: Some("image/png".into()),
        bytes: vec![1, 2, 3, 4],
    });

    let body = client.send(ApiRequest::post("/teams").multipart(form)).await.unwrap();
    let parts = body["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["name"], "name");
    assert_eq!(parts[1]["name"], "logo");
    assert_eq!(parts[1]["file"], "logo.png");
    assert_eq!(parts[1]["len"], 4);
}

#[tokio::test]
async fn error_status_carries_backend_message() {
    let router = Router::new().route(
        "/api/admin/verify-player/9",
        patch(|| async { (StatusCode::FORBIDDEN, axum::Json(json!({ "message": "Admins only" }))) }),
    );
    let base = spawn_backend(router).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let err = client.send(ApiRequest::patch("/admin/verify-player/9")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Admins only");
}

#[tokio::test]
async fn error_status_without_body_uses_reason() {
    let base = spawn_backend(Router::new()).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let err = client.send(ApiRequest::get("/missing")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ApiError::Status { status: 404, ref message } if message == "Not Found"));
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let router = Router::new().route("/api/news/1", axum::routing::delete(|| async { StatusCode::NO_CONTENT }));
    let base = spawn_backend(router).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let body = client.send(ApiRequest::delete("/news/1")).await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn ids_and_query_values_arrive_decoded() {
    let router = Router::new().route(
        "/api/teams/{id}",
        get(
            |axum::extract::Path(id): axum::extract::Path<String>,
             axum::extract::Query(query): axum::extract::Query<std::collections::HashMap<String, String>>| async move {
                axum::Json(json!({ "id": id, "q": query.get("q") }))
            },
        ),
    );
    let base = spawn_backend(router).await;
    let client = BackendClient::new(&base, TIMEOUTS).unwrap();

    let body = client
        .send(ApiRequest::get("/teams").segment("a b/c?").query("q", "x&y=z"))
        .await
        .unwrap();
    assert_eq!(body["id"], "a b/c?");
    assert_eq!(body["q"], "x&y=z");
}

#[tokio::test]
async fn unreachable_backend_is_request_error() {
    let client = BackendClient::new("http://127.0.0.1:9", TIMEOUTS).unwrap();
    let err = client.send(ApiRequest::get("/teams")).await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn url_joins_segments_below_base_path() {
    let request = ApiRequest::get("/players").segment("p 1/2").query("teamId", "t&1");
    for base in ["http://api.local/api", "http://api.local/api/"] {
        let client = BackendClient::new(base, TIMEOUTS).unwrap();
        assert_eq!(client.url(&request).as_str(), "http://api.local/api/players/p%201%2F2?teamId=t%261");
    }

    let bare = BackendClient::new("http://api.local", TIMEOUTS).unwrap();
    assert_eq!(bare.url(&ApiRequest::get("teams")).as_str(), "http://api.local/teams");
}

#[test]
fn base_url_must_be_hierarchical() {
    assert!(matches!(BackendClient::new("api.local/api", TIMEOUTS), Err(ApiError::InvalidBaseUrl(_))));
    assert!(matches!(BackendClient::new("mailto:ops@league.test", TIMEOUTS), Err(ApiError::InvalidBaseUrl(_))));
}

#[test]
fn path_renders_unencoded_route() {
    let request = ApiRequest::patch("/matches").segment("m1").segment("result");
    assert_eq!(request.segments, ["matches", "m1", "result"]);
    assert_eq!(request.path(), "/matches/m1/result");
    assert_eq!(ApiRequest::get("/players").query("teamId", "t1").path(), "/players?teamId=t1");
}

#[test]
fn extract_error_message_prefers_message_then_error_then_msg() {
    assert_eq!(extract_error_message(r#"{"message":"m","error":"e"}"#).as_deref(), Some("m"));
    assert_eq!(extract_error_message(r#"{"error":"e","msg":"x"}"#).as_deref(), Some("e"));
    assert_eq!(extract_error_message(r#"{"msg":"x"}"#).as_deref(), Some("x"));
    assert_eq!(extract_error_message(r#"{"error":{"message":"nested"}}"#).as_deref(), Some("nested"));
}

#[test]
fn extract_error_message_plain_text_and_html() {
    assert_eq!(extract_error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
    assert_eq!(extract_error_message("<html><body>oops</body></html>"), None);
    assert_eq!(extract_error_message("   "), None);
    assert_eq!(extract_error_message(r#"{"status":500}"#), None);
}

#[test]
fn parse_body_rejects_invalid_json() {
    assert!(matches!(parse_body("not json"), Err(ApiError::Parse(_))));
    assert_eq!(parse_body(" [1] ").unwrap(), json!([1]));
}

#[test]
fn user_message_fallbacks() {
    let err = ApiError::Status { status: 500, message: String::new() };
    assert_eq!(err.user_message(), "Request failed (500)");
    assert!(ApiError::Request("x".into()).user_message().contains("Could not reach"));
}

#[test]
fn upload_form_lookups() {
    let form = UploadForm::new().text("name", "  ").text("captain", " Rohit ");
    assert_eq!(form.field("name"), Some("  "));
    assert_eq!(form.non_empty("name"), None);
    assert_eq!(form.non_empty("captain"), Some("Rohit"));
    assert!(form.file("logo").is_none());
}

#[test]
fn with_token_ignores_empty_token() {
    assert_eq!(ApiRequest::get("/x").with_token(Some("")).token, None);
    assert_eq!(ApiRequest::get("/x").with_token(None).token, None);
    assert_eq!(ApiRequest::get("/x").with_token(Some("t")).token.as_deref(), Some("t"));
}
