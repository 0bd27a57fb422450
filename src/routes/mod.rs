// ABOUTME: HTTP route assembly for the bookshelf REST API
// ABOUTME: Merges per-resource routers and applies request ID, CORS, and tracing layers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Routes
//!
//! Every resource lives under `/api`. Lookups that find nothing answer
//! `204 No Content`; mutations answer with a `{ "message": ... }` body.

/// Book lookup, creation, search, and rankings
pub mod books;
/// Liveness and readiness probes
pub mod health;
/// Review endpoints
pub mod reviews;
/// Reading status endpoints
pub mod statuses;
/// Account endpoints
pub mod users;

pub use books::BookRoutes;
pub use health::HealthRoutes;
pub use reviews::ReviewRoutes;
pub use statuses::StatusRoutes;
pub use users::UserRoutes;

use crate::errors::{AppError, AppResult};
use crate::middleware::{request_id_middleware, setup_cors};
use crate::models::ReadingStatus;
use crate::resources::ServerResources;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(BookRoutes::routes(Arc::clone(resources)))
        .merge(ReviewRoutes::routes(Arc::clone(resources)))
        .merge(StatusRoutes::routes(Arc::clone(resources)))
        .merge(UserRoutes::routes(Arc::clone(resources)))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config.cors))
        .layer(middleware::from_fn(request_id_middleware))
}

/// JSON request body whose rejections use the API error format
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(request, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
    }
}

/// `200` with the value, or `204` when there is nothing
pub(crate) fn found_or_no_content<T: Serialize>(value: Option<T>) -> Response {
    value.map_or_else(
        || StatusCode::NO_CONTENT.into_response(),
        |value| (StatusCode::OK, Json(value)).into_response(),
    )
}

/// `200` with the items, or `204` when the list is empty
pub(crate) fn list_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::OK, Json(items)).into_response()
    }
}

/// Parse a `status` query value
///
/// Absent or non-numeric values mean "no filter"; a number outside 0-2 is rejected.
///
/// # Errors
///
/// Returns a validation error for numeric codes outside 0-2
pub fn parse_status_filter(raw: Option<&str>) -> AppResult<Option<ReadingStatus>> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<i64>().ok())
        .map(ReadingStatus::from_code)
        .transpose()
}
