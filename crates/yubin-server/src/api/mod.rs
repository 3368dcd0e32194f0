mod access_logs;
mod address;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use yubin_db::AccessLogStore;
use yubin_geoapi::GeoLookup;
use yubin_resolver::{ResolveError, Resolver};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<dyn GeoLookup>,
    pub access_logs: Arc<dyn AccessLogStore>,
    pub resolver: Resolver,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &yubin_db::DbError) -> ApiError {
    tracing::error!(error = %error, "access log query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

pub(super) fn map_geo_error(request_id: String, error: &yubin_geoapi::GeoApiError) -> ApiError {
    tracing::warn!(error = %error, "geo api lookup failed");
    ApiError::new(request_id, "upstream_error", "geo api lookup failed")
}

pub(super) fn map_resolve_error(request_id: String, error: &ResolveError) -> ApiError {
    match error {
        ResolveError::NotFound => ApiError::new(request_id, "not_found", error.to_string()),
        ResolveError::MalformedCoordinate { .. } => {
            tracing::warn!(error = %error, "geo api returned an unusable coordinate");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
        ResolveError::InvalidInput(_) => {
            tracing::error!(error = %error, "resolver rejected its input");
            ApiError::new(request_id, "internal_error", "address resolution failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/address", get(address::get_address))
        .route("/address/access_logs", get(access_logs::list_access_logs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "This is root!\n"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.access_logs.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
