//! HTTP host layer: axum routes around the dispatch engine.
//!
//! `POST /soap/{service}` carries SOAP payloads; `GET /{service}/{file}`
//! serves the service's WSDL/XSD documents from disk; `GET /` returns a
//! JSON catalog of registered services.

use crate::config::SettingsConfig;
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::error::SoapError;
use crate::response::build_fault;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Shared state for all routes. The dispatcher (and the registry inside
/// it) is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub settings: Arc<SettingsConfig>,
    pub artifact_dir: PathBuf,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let max_body_size = state.settings.max_body_size;
    Router::new()
        .route("/", get(index_handler))
        .route("/soap/{service}", post(soap_handler))
        .route("/{service}/{filename}", get(artifact_handler))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle one SOAP request end to end.
async fn soap_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    if !state.settings.is_allowed_content_type(content_type) {
        let err = SoapError::UnsupportedContentType(
            content_type.unwrap_or("none").to_string(),
        );
        debug!(service = %service, content_type = ?content_type, "Rejected non-SOAP content type");
        return fault_response(&build_fault(&err.to_string()));
    }

    match state.dispatcher.dispatch(&service, body.as_bytes()).await {
        DispatchOutcome::Response(envelope) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            envelope,
        )
            .into_response(),
        DispatchOutcome::Acknowledged => StatusCode::ACCEPTED.into_response(),
        DispatchOutcome::Fault(envelope) => fault_response(&envelope),
    }
}

/// Serve a service's WSDL or XSD document.
async fn artifact_handler(
    State(state): State<AppState>,
    Path((service, filename)): Path<(String, String)>,
) -> Response {
    if state.dispatcher.registry().lookup(&service).is_none() {
        return (StatusCode::NOT_FOUND, "unknown service").into_response();
    }

    // Artifact names never contain separators; anything else is a
    // traversal attempt.
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return (StatusCode::NOT_FOUND, "artifact not found").into_response();
    }

    let path = state.artifact_dir.join(&service).join(&filename);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/xml")],
            content,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "artifact not found").into_response(),
    }
}

/// JSON catalog of registered services.
async fn index_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let services: Vec<serde_json::Value> = state
        .dispatcher
        .registry()
        .services()
        .map(|handler| {
            let descriptor = handler.descriptor();
            json!({
                "name": descriptor.name,
                "endpoint": format!("/soap/{}", descriptor.name),
                "wsdl": format!("/{}/{}", descriptor.name, descriptor.wsdl_file),
                "namespace": descriptor.namespace,
                "operations": descriptor.operations,
            })
        })
        .collect();

    Json(json!({ "services": services }))
}

fn fault_response(envelope: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
        envelope.to_string(),
    )
        .into_response()
}
