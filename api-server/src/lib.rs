//! JSON front-end for the web4 sandbox.
//!
//! Each request builds its own [`Sandbox`] from the shared gateway client and
//! the caller's cookie, so no form state outlives a request.

use axum::{
    Json, Router,
    extract::{
        FromRequest, FromRequestParts, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use sandbox_app::{HttpGateway, Sandbox, SandboxConfig, Tab};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use web4::{GatewayRequest, Session, SignRequest, SnippetFlavor, ViewCallRequest};

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SnippetQuery {
    /// `js` (default) or `curl`
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    /// Root-relative gateway URL
    pub url: String,

    /// The same URL resolved against the gateway ("Try it")
    pub try_it: String,

    pub query: String,

    /// Display object mirroring the query string
    pub params: Map<String, Value>,

    pub snippet: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CallResponse {
    pub url: String,

    /// Response body, or `Error: <message>` when the fetch failed
    pub output: String,

    pub failed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub account_id: Option<String>,

    /// Login or logout URL, whichever applies
    pub action_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub gateway: String,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        details: Option<String>,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            ApiError::InvalidRequest { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidRequest {
            message: "Invalid JSON body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        ApiError::InvalidRequest {
            message: "Invalid query string".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

/// `Json` extractor whose rejections are reported as [`ErrorResponse`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections are reported as [`ErrorResponse`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: SandboxConfig,
    pub gateway: HttpGateway,
}

impl AppState {
    pub fn from_config(config: SandboxConfig) -> Result<Self, ApiError> {
        let gateway = HttpGateway::from_config(&config)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok(Self { config, gateway })
    }

    fn sandbox(&self, headers: &HeaderMap) -> Sandbox<HttpGateway> {
        Sandbox::new(self.gateway.clone(), session_from_headers(headers))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Session from every `Cookie` header on the request
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    let cookies = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    Session::from_cookie_header(&cookies)
}

fn snippet_flavor(query: &SnippetQuery) -> Result<SnippetFlavor, ApiError> {
    query
        .snippet
        .as_deref()
        .map_or(Ok(SnippetFlavor::default()), |s| {
            s.parse().map_err(|e: web4::Web4Error| ApiError::invalid(e.to_string()))
        })
}

// ============================================================================
// API Handlers
// ============================================================================

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        gateway: state.config.gateway_url.clone(),
    })
}

/// Build a view-call URL without calling it
async fn view_url(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SnippetQuery>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<ViewCallRequest>,
) -> Result<Json<UrlResponse>, ApiError> {
    let flavor = snippet_flavor(&query)?;
    let encoded = request.encode();

    let mut sandbox = state.sandbox(&headers);
    *sandbox.view_form_mut() = request.into();
    sandbox.preview_view();

    Ok(Json(UrlResponse {
        try_it: sandbox.try_it().unwrap_or_default(),
        url: encoded.path,
        query: encoded.query,
        params: encoded.params,
        snippet: sandbox.snippet(flavor),
    }))
}

/// Build a view-call URL and GET it from the gateway
async fn view_call(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<ViewCallRequest>,
) -> Json<CallResponse> {
    let mut sandbox = state.sandbox(&headers);
    *sandbox.view_form_mut() = request.into();

    let output = sandbox.submit_view().await.clone();

    Json(CallResponse {
        url: sandbox.state().preview_url.clone().unwrap_or_default(),
        failed: output.is_error(),
        output: output.render(),
    })
}

/// Build a sign redirect URL
async fn sign_url(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SnippetQuery>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<SignRequest>,
) -> Result<Json<UrlResponse>, ApiError> {
    let flavor = snippet_flavor(&query)?;
    let encoded = request.encode();

    let mut sandbox = state.sandbox(&headers);
    sandbox.select_tab(Tab::Sign);
    *sandbox.sign_form_mut() = request.into();
    let navigation = sandbox.submit_sign();

    Ok(Json(UrlResponse {
        url: encoded.path,
        try_it: navigation.url,
        query: encoded.query,
        params: encoded.params,
        snippet: sandbox.snippet(flavor),
    }))
}

/// Redirect the browser to the gateway signing page
async fn sign_redirect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiQuery(request): ApiQuery<SignRequest>,
) -> Redirect {
    let mut sandbox = state.sandbox(&headers);
    *sandbox.sign_form_mut() = request.into();
    Redirect::to(&sandbox.submit_sign().url)
}

/// Who the cookie says is signed in
async fn session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<SessionResponse> {
    let sandbox = state.sandbox(&headers);
    let session = sandbox.session();
    Json(SessionResponse {
        signed_in: session.is_signed_in(),
        account_id: session.account_id().map(str::to_string),
        action_url: sandbox.session_navigation().url,
    })
}

async fn login(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    Redirect::to(&state.sandbox(&headers).login().url)
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    Redirect::to(&state.sandbox(&headers).logout().url)
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    info!("Routing gateway calls to {}", state.config.gateway_url);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/view/url", post(view_url))
        .route("/api/view/call", post(view_call))
        .route("/api/sign/url", post(sign_url))
        .route("/api/session", get(session))
        .route("/sign", get(sign_redirect))
        .route("/login", get(login))
        .route("/logout", get(logout))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
