use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use floornav_core::{GraphError, NavError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no graph loaded")]
    NotLoaded,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Empty => AppError::NotLoaded,
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<NavError> for AppError {
    fn from(e: NavError) -> Self {
        match e {
            NavError::Graph(g) => g.into(),
            other => AppError::NotFound(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self { AppError::BadRequest(e.body_text()) }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self { AppError::BadRequest(e.body_text()) }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self { AppError::BadRequest(e.body_text()) }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorPayload<'a>,
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::NotLoaded => (StatusCode::SERVICE_UNAVAILABLE, "not_loaded"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        let body = ErrorBody { error: ErrorPayload { code, message: self.to_string() } };
        (status, Json(body)).into_response()
    }
}
