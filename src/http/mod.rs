//! HTTP transport - the REST surface over a `LampService`.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - banner text.
//! - `GET /health` - `{ "status": "ok" }`.
//! - `GET /v1/lamps?cursor=&pageSize=` - one page of lamps.
//! - `POST /v1/lamps` - create, `201` with the lamp.
//! - `GET /v1/lamps/:lampId` - fetch.
//! - `PUT /v1/lamps/:lampId` - set status.
//! - `DELETE /v1/lamps/:lampId` - delete, `204`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lamp_control::{http, InMemoryLampStore, LampService};
//!
//! let service = Arc::new(LampService::new(InMemoryLampStore::new()));
//! let app = http::router(service.clone());
//! http::serve(service, "0.0.0.0:8080", std::future::pending()).await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::LampError;
use crate::lamp::{LampCreate, LampUpdate};
use crate::service::{LampService, PageRequest};
use crate::store::LampStore;

/// Build an axum `Router` serving the lamp API from the given service.
pub fn router<S: LampStore + 'static>(service: Arc<LampService<S>>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/v1/lamps",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/v1/lamps/:lamp_id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the API at `addr` until `shutdown` resolves.
pub async fn serve<S, F>(
    service: Arc<LampService<S>>,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: LampStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "lamp api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

impl IntoResponse for LampError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match &self {
            LampError::NotFound(_) => "Lamp not found".to_string(),
            e if e.is_client_error() => e.to_string(),
            e => {
                error!(error = %e, "request failed");
                "Internal server error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn malformed_body(rejection: JsonRejection) -> LampError {
    LampError::MalformedInput(rejection.body_text())
}

fn malformed_query(rejection: QueryRejection) -> LampError {
    LampError::MalformedInput(rejection.body_text())
}

#[derive(Debug, Deserialize)]
struct ListParams {
    cursor: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

/// `GET /`
async fn root_handler() -> &'static str {
    "Lamp Control API - Rust Implementation"
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `GET /v1/lamps`
async fn list_handler<S: LampStore>(
    State(service): State<Arc<LampService<S>>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, LampError> {
    let Query(params) = query.map_err(malformed_query)?;
    let page = PageRequest::parse(params.cursor.as_deref(), params.page_size.as_deref())?;
    Ok(Json(service.list(page).await?))
}

/// `POST /v1/lamps`
async fn create_handler<S: LampStore>(
    State(service): State<Arc<LampService<S>>>,
    body: Result<Json<LampCreate>, JsonRejection>,
) -> Result<impl IntoResponse, LampError> {
    let Json(input) = body.map_err(malformed_body)?;
    let lamp = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(lamp)))
}

/// `GET /v1/lamps/:lamp_id`
async fn get_handler<S: LampStore>(
    State(service): State<Arc<LampService<S>>>,
    Path(lamp_id): Path<String>,
) -> Result<impl IntoResponse, LampError> {
    Ok(Json(service.get(&lamp_id).await?))
}

/// `PUT /v1/lamps/:lamp_id`
async fn update_handler<S: LampStore>(
    State(service): State<Arc<LampService<S>>>,
    Path(lamp_id): Path<String>,
    body: Result<Json<LampUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, LampError> {
    let Json(input) = body.map_err(malformed_body)?;
    Ok(Json(service.update(&lamp_id, input).await?))
}

/// `DELETE /v1/lamps/:lamp_id`
async fn delete_handler<S: LampStore>(
    State(service): State<Arc<LampService<S>>>,
    Path(lamp_id): Path<String>,
) -> Result<impl IntoResponse, LampError> {
    service.delete(&lamp_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
