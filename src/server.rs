//! JSON HTTP 接口
//!
//! **浏览（匿名）：**
//! - `GET  /` - 所有模式
//! - `GET  /{mode}` - 模式下的科目
//! - `GET  /{mode}/{subject}` - 科目下的 PDF
//! - `GET  /pdf/{subject}/{filename}` - 单个 PDF
//! - `GET  /search?query=...` - 检索
//!
//! **管理员：**
//! - `POST /login` - 登录，返回令牌并设置 `session` cookie
//! - `GET|POST /logout` - 注销
//! - `GET  /upload` - 上传表单可选项
//! - `POST /upload` - 上传 PDF 元数据
//!
//! **健康检查：**
//! - `GET  /health`

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::{
    DocumentResponse, ErrorResponse, HealthResponse, HomeResponse, LoginRequest, LoginResponse,
    MessageResponse, ModeResponse, SearchRequest, SearchResponse, SubjectResponse,
    UploadOptionsResponse, UploadResponse,
};
use crate::auth::{AdminGrant, Credentials, SessionRegistry};
use crate::engine::CatalogEngine;
use crate::error::CatalogError;
use crate::store::StoreError;
use crate::upload::{UploadForm, UploadOutcome};

/// 会话 cookie 名
pub const SESSION_COOKIE: &str = "session";

pub const MSG_LOGGED_IN: &str = "Logged in successfully.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const MSG_LOGGED_OUT: &str = "Logged out.";
pub const MSG_LOGIN_REQUIRED: &str = "Please login to access this page.";
pub const MSG_PAGE_NOT_FOUND: &str = "Page not found (404)";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error (500)";

// ── 服务状态 ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub engine: CatalogEngine,
    pub sessions: SessionRegistry,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(engine: CatalogEngine, credentials: Credentials) -> Self {
        let ttl = Duration::from_secs(engine.config().admin.session_ttl_secs);
        Self {
            engine,
            sessions: SessionRegistry::with_ttl(ttl),
            credentials,
        }
    }
}

// ── 错误映射 ──────────────────────────────────────────────────────────────

/// 接口错误：状态码 + JSON 错误体
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new("not_found", message),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorResponse::new("unauthorized", message),
        }
    }

    /// 不向客户端暴露存储细节
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse::new("internal_error", MSG_INTERNAL_ERROR),
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body = self.body.with_details(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidSelector(message) => ApiError::not_found(message),
            CatalogError::NotFound { subject, filename } => {
                ApiError::not_found("PDF not found").with_details(format!("{subject}/{filename}"))
            }
            CatalogError::Infrastructure(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "document store failure");
        ApiError::internal()
    }
}

// ── 管理员会话 ────────────────────────────────────────────────────────────

/// 从 `Authorization: Bearer` 或 `session` cookie 中取令牌
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.trim().to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// 已登录的管理员；未登录时拒绝请求（401）
pub struct AdminSession(pub AdminGrant);

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        session_token(&parts.headers)
            .and_then(|token| state.sessions.authorize(&token))
            .map(AdminSession)
            .ok_or_else(|| ApiError::unauthorized(MSG_LOGIN_REQUIRED))
    }
}

// ── 浏览 ──────────────────────────────────────────────────────────────────

async fn home(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    Json(HomeResponse::new(state.engine.modes()))
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let documents = state.engine.store().count()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        documents,
    }))
}

async fn mode_page(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ModeResponse>, ApiError> {
    let (mode, subjects) = state.engine.subjects_for_mode(&mode)?;
    Ok(Json(ModeResponse::new(mode, subjects)))
}

async fn subject_page(
    State(state): State<Arc<AppState>>,
    Path((mode, subject)): Path<(String, String)>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let (mode, subject, documents) = state.engine.list_by_subject(&mode, &subject)?;
    Ok(Json(SubjectResponse::new(mode, subject, documents)))
}

async fn pdf_view(
    State(state): State<Arc<AppState>>,
    Path((subject, filename)): Path<(String, String)>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document = state.engine.get_document(&subject, &filename)?;
    Ok(Json(document.into()))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    Ok(Json(state.engine.search(&request)?))
}

// ── 管理员 ────────────────────────────────────────────────────────────────

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if !state.credentials.is_enabled() {
        tracing::warn!("login attempted but admin credentials are not configured");
        return Err(ApiError::unauthorized(MSG_INVALID_CREDENTIALS));
    }

    let Some(token) = state
        .sessions
        .login(&state.credentials, &request.username, &request.password)
    else {
        tracing::warn!(username = request.username.trim(), "admin login failed");
        return Err(ApiError::unauthorized(MSG_INVALID_CREDENTIALS));
    };

    tracing::info!("admin logged in");
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    let body = LoginResponse {
        message: MSG_LOGGED_IN.to_string(),
        token,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.sessions.logout(&token) {
            tracing::info!("admin logged out");
        }
    }
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Json(MessageResponse::new(MSG_LOGGED_OUT))).into_response()
}

async fn upload_form(_admin: AdminSession) -> Json<UploadOptionsResponse> {
    Json(UploadOptionsResponse::new())
}

async fn upload(
    State(state): State<Arc<AppState>>,
    AdminSession(grant): AdminSession,
    Json(form): Json<UploadForm>,
) -> Result<Response, ApiError> {
    let outcome = state.engine.upload(&grant, form)?;

    let location = match &outcome {
        UploadOutcome::Created { location, .. } => Some(location.path()),
        _ => None,
    };
    let body = Json(UploadResponse::from(outcome));

    // 校验失败 / 重复仍然是 200，消息逐条返回给提交者
    let response = match location {
        Some(path) => (StatusCode::CREATED, [(header::LOCATION, path)], body).into_response(),
        None => (StatusCode::OK, body).into_response(),
    };
    Ok(response)
}

async fn fallback() -> ApiError {
    ApiError::not_found(MSG_PAGE_NOT_FOUND)
}

// ── 路由 ──────────────────────────────────────────────────────────────────

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/search", get(search))
        // 管理员
        .route("/login", axum::routing::post(login))
        .route("/logout", get(logout).post(logout))
        .route("/upload", get(upload_form).post(upload))
        // 浏览
        .route("/pdf/{subject}/{filename}", get(pdf_view))
        .route("/{mode}", get(mode_page))
        .route("/{mode}/{subject}", get(subject_page))
        .fallback(fallback)
        .with_state(state)
}

/// 启动 HTTP 服务，Ctrl-C 优雅退出
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let app = app_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("pdf catalog listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
