use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::InfoConfig;
use crate::dispatch::RenderedResponse;
use crate::http::server::AppState;
use crate::routing::Route;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
    pub summary: String,
    pub responses: Vec<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            method: route.method.clone(),
            path: route.template.as_str().to_string(),
            summary: route.summary.clone(),
            responses: route
                .responses
                .iter()
                .map(|r| r.status_code.clone())
                .collect(),
        }
    }
}

pub async fn get_root() -> Json<Value> {
    Json(json!({ "message": "Are you meant to be here?" }))
}

pub async fn get_info(State(state): State<AppState>) -> Json<InfoConfig> {
    Json(state.info.as_ref().clone())
}

pub async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(
        state
            .dispatcher
            .table()
            .iter()
            .map(RouteSummary::from)
            .collect(),
    )
}

pub async fn get_metrics(State(state): State<AppState>) -> Response {
    match state.telemetry.render() {
        Some(text) => ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], text).into_response(),
        None => RenderedResponse::not_found("GET", "/mocky/metrics").into_response(),
    }
}
