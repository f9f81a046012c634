// tests/http_api.rs - HTTP 接口测试
//! 在内存存储上构建完整路由，用 `oneshot` 逐个发请求

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use pdf_catalog::CatalogEngineBuilder;
use pdf_catalog::auth::Credentials;
use pdf_catalog::server::{AppState, app_router};

fn app() -> Router {
    let engine = CatalogEngineBuilder::new().in_memory().build().unwrap();
    let state = Arc::new(AppState::new(engine, Credentials::new("admin", "secret")));
    app_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, format!("session={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, headers, body) = send(
        app,
        post_json("/login", json!({"username": "admin", "password": "secret"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged in successfully.");

    let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    body["token"].as_str().unwrap().to_string()
}

async fn upload(
    app: &Router,
    title: &str,
    session: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    send(app, post_json("/upload", upload_body(title), session)).await
}

fn upload_body(title: &str) -> Value {
    json!({
        "mode": "Academic",
        "subject": "Physics 1st Paper",
        "title": title,
        "link": "https://example.com/vectors.pdf",
        "description": "Vector algebra basics",
    })
}

#[tokio::test]
async fn test_home_and_mode_pages() {
    let app = app();

    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modes"], json!(["academic", "admission"]));

    let (status, _, body) = send(&app, get("/admission")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "admission");
    assert_eq!(body["subjects"].as_array().unwrap().len(), 12);

    let (status, _, body) = send(&app, get("/medical")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid Mode");

    let (status, _, body) = send(&app, get("/academic/history")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid Mode or Subject");
}

#[tokio::test]
async fn test_upload_requires_login() {
    let app = app();

    let (status, _, body) = send(&app, get("/upload")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Please login to access this page.");

    let (status, _, _) = upload(&app, "Vectors", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = upload(&app, "Vectors", Some("forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(
        &app,
        post_json("/login", json!({"username": "admin", "password": "wrong"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_upload_then_browse() {
    let app = app();
    let token = login(&app).await;

    let (status, _, body) = send(
        &app,
        Request::builder()
            .uri("/upload")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modes"].as_array().unwrap().len(), 2);

    let (status, headers, body) = upload(&app, "Vectors & Scalars", Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        "/academic/physics%201st%20paper"
    );
    assert_eq!(body["status"], "created");
    assert_eq!(body["document"]["filename"], "vectors-scalars");

    let (status, _, body) = send(&app, get("/academic/physics%201st%20paper")).await;
    assert_eq!(status, StatusCode::OK);
    let pdfs = body["pdfs"].as_array().unwrap();
    assert_eq!(pdfs.len(), 1);
    assert_eq!(pdfs[0]["title"], "Vectors & Scalars");

    // 同一科目在另一个模式下为空
    let (_, _, body) = send(&app, get("/admission/physics%201st%20paper")).await;
    assert!(body["pdfs"].as_array().unwrap().is_empty());

    let (status, _, body) = send(&app, get("/pdf/physics%201st%20paper/vectors-scalars")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["link"], "https://example.com/vectors.pdf");

    let (status, _, body) = send(&app, get("/pdf/ict/vectors-scalars")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "PDF not found");

    let (status, _, body) = send(&app, get("/pdf/history/vectors-scalars")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid Subject");

    let (_, _, body) = send(&app, get("/health")).await;
    assert_eq!(body["documents"], 1);
}

#[tokio::test]
async fn test_duplicate_and_invalid_uploads() {
    let app = app();
    let token = login(&app).await;

    let (status, _, _) = upload(&app, "Vectors", Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, headers, body) = upload(&app, " vectors! ", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::LOCATION).is_none());
    assert_eq!(body["status"], "duplicate_exists");
    assert_eq!(
        body["messages"],
        json!(["A PDF with this title already exists for this subject and mode."])
    );
    assert_eq!(body["form"]["title"], " vectors! ");

    let (status, _, body) = send(
        &app,
        post_json(
            "/upload",
            json!({"mode": "academic", "subject": "ict", "title": "", "link": "  "}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "validation_failed");
    assert_eq!(body["messages"], json!(["Title is required.", "Link is required."]));

    let (_, _, body) = send(&app, get("/health")).await;
    assert_eq!(body["documents"], 1);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = app();
    let token = login(&app).await;

    let (status, headers, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, format!("session={token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out.");
    assert!(headers.get(header::SET_COOKIE).unwrap().to_str().unwrap().contains("Max-Age=0"));

    let (status, _, _) = upload(&app, "Vectors", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 未登录时注销同样成功
    let (status, _, _) = send(&app, get("/logout")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_endpoint() {
    let app = app();
    let token = login(&app).await;
    upload(&app, "Vectors", Some(&token)).await;

    let (status, _, body) = send(&app, get("/search")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let (_, _, body) = send(&app, get("/search?query=%20%20")).await;
    assert_eq!(body["total"], 0);

    let (_, _, body) = send(&app, get("/search?query=PHYSICS")).await;
    assert_eq!(body["query"], "PHYSICS");
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["url"], "/pdf/physics%201st%20paper/vectors");

    let (_, _, body) = send(&app, get("/search?query=algebra")).await;
    assert_eq!(body["total"], 1);

    let (_, _, body) = send(&app, get("/search?query=.*")).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_bangla_title_urls_are_ascii() {
    let app = app();
    let token = login(&app).await;

    let body = json!({
        "mode": "admission",
        "subject": "Bangla 2nd Paper",
        "title": "বাংলা ব্যাকরণ",
        "link": "https://example.com/grammar.pdf",
    });
    let (status, headers, body) = send(&app, post_json("/upload", body, Some(&token))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        "/admission/bangla%202nd%20paper"
    );

    let url = body["document"]["url"].as_str().unwrap().to_string();
    assert!(url.is_ascii(), "{url}");

    // 返回的 url 可以直接用来取回文档
    let (status, _, body) = send(&app, get(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "বাংলা ব্যাকরণ");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app();
    let (status, _, body) = send(&app, get("/a/b/c/d")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Page not found (404)");
}

#[tokio::test]
async fn test_login_disabled_without_credentials() {
    let engine = CatalogEngineBuilder::new().in_memory().build().unwrap();
    let app = app_router(Arc::new(AppState::new(engine, Credentials::new("", ""))));

    let body = json!({"username": "", "password": ""});
    let (status, _, _) = send(&app, post_json("/login", body, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
