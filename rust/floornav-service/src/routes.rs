use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, response::IntoResponse, Json};
use floornav_core::{Graph, GraphError, Waypoint};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info, info_span};

use crate::errors::AppError;
use crate::models::{GraphSummary, LengthQuery, LengthResponse, RouteRequest, RouteResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Healthz { pub status: &'static str }

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(Healthz { status: "ok" }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let loc = state.current.load_full();
    match loc.graph() {
        Ok(g) => (
            StatusCode::OK,
            Json(json!({"ready": true, "waypoints": g.len(), "loaded_at_unix": loc.loaded_at_unix})),
        )
            .into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"ready": false, "error": e.to_string()}))).into_response(),
    }
}

pub async fn version() -> impl IntoResponse {
    let svc_version = env!("CARGO_PKG_VERSION");
    let core_version = floornav_core::version();
    (StatusCode::OK, Json(json!({"service_version": svc_version, "core_version": core_version})))
}

fn summary(graph: &Graph) -> GraphSummary {
    GraphSummary { waypoints: graph.len(), levels: graph.levels(), width: graph.width(), height: graph.height() }
}

pub async fn graph_summary(State(state): State<AppState>) -> Result<Json<GraphSummary>, AppError> {
    let loc = state.current.load_full();
    Ok(Json(summary(loc.graph()?)))
}

/// Replaces the served location with the posted document.
pub async fn load_graph(State(state): State<AppState>, body: String) -> Result<Json<GraphSummary>, AppError> {
    let graph = Graph::from_json_str(&body)?;
    let out = summary(&graph);
    state.install(graph, None);
    info!(waypoints = out.waypoints, levels = ?out.levels, "location replaced via api");
    Ok(Json(out))
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<GraphSummary>, AppError> {
    if state.graph_path.is_none() {
        return Err(AppError::BadRequest("FLOORNAV_GRAPH not set".into()));
    }
    if let Err(e) = state.reload_from_disk() {
        error!(error = %format!("{e:#}"), "reload failed");
        return Err(AppError::Internal(e));
    }
    let loc = state.current.load_full();
    Ok(Json(summary(loc.graph()?)))
}

pub async fn route(State(state): State<AppState>, req: Result<Json<RouteRequest>, JsonRejection>) -> Result<Json<RouteResponse>, AppError> {
    let Json(req) = req?;
    let span = info_span!("route", start = req.start, finish = req.finish, floor = req.floor);
    let _enter = span.enter();

    let loc = state.current.load_full();
    let mut nav = loc.navigator()?;
    match nav.route(req.start, req.finish, req.floor) {
        Ok(route) => {
            info!(waypoints = route.waypoints.len(), length = route.length, expanded = route.expanded, "route done");
            Ok(Json(RouteResponse::found(&route)))
        }
        Err(e) if e.is_no_path() => {
            debug!(reason = %e, "no route");
            Ok(Json(RouteResponse::not_found(e.to_string())))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn route_length(State(state): State<AppState>, q: Result<Query<LengthQuery>, QueryRejection>) -> Result<Json<LengthResponse>, AppError> {
    let Query(q) = q?;
    let span = info_span!("route_length", start = q.start, finish = q.finish);
    let _enter = span.enter();

    let loc = state.current.load_full();
    let mut nav = loc.navigator()?;
    let length = nav.route_length(q.start, q.finish)?;
    Ok(Json(LengthResponse { length }))
}

pub async fn waypoint(State(state): State<AppState>, id: Result<Path<u32>, PathRejection>) -> Result<Json<Waypoint>, AppError> {
    let Path(id) = id?;
    let loc = state.current.load_full();
    match loc.graph()?.waypoint(id) {
        Ok(w) => Ok(Json(w.clone())),
        Err(e @ GraphError::OutOfRange { .. }) => Err(AppError::NotFound(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

pub async fn levels(State(state): State<AppState>) -> Result<Json<Vec<i32>>, AppError> {
    let loc = state.current.load_full();
    Ok(Json(loc.graph()?.levels()))
}

pub async fn level_waypoints(State(state): State<AppState>, level: Result<Path<i32>, PathRejection>) -> Result<Json<Vec<Waypoint>>, AppError> {
    let Path(level) = level?;
    let loc = state.current.load_full();
    Ok(Json(loc.graph()?.waypoints_on_level(level).cloned().collect()))
}
