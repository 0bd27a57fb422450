// ABOUTME: Reading status route handlers: per-user listings, keyed lookup, and authenticated mutations
// ABOUTME: Mutations require a token issued to the status owner
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{found_or_no_content, list_or_no_content, parse_status_filter, JsonBody};
use crate::constants::messages;
use crate::errors::AppError;
use crate::middleware::AuthenticatedUser;
use crate::models::{MessageResponse, StatusRequest, UpdateStatusRequest};
use crate::resources::ServerResources;
use crate::services::statuses;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// `?status=`
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterQuery {
    /// Status code filter
    pub status: Option<String>,
}

/// Status routes implementation
pub struct StatusRoutes;

impl StatusRoutes {
    /// Create all status routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/statuses",
                post(Self::handle_add).put(Self::handle_update),
            )
            .route("/api/statuses/:username", get(Self::handle_list))
            .route(
                "/api/statuses/:username/book/:isbn",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(username): Path<String>,
        Query(query): Query<StatusFilterQuery>,
    ) -> Result<Response, AppError> {
        let status = parse_status_filter(query.status.as_deref())?;
        let found = statuses::get_statuses(&resources.database, &username, status).await?;
        Ok(list_or_no_content(found))
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path((username, isbn)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let status = statuses::get_status(&resources.database, &username, &isbn).await?;
        Ok(found_or_no_content(status))
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(request): JsonBody<StatusRequest>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&request.username)?;
        statuses::add_status(&resources.database, &request).await?;
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(messages::STATUS_ADDED)),
        )
            .into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(request): JsonBody<UpdateStatusRequest>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&request.username)?;
        statuses::update_status(&resources.database, &request).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::STATUS_UPDATED)),
        )
            .into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path((username, isbn)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&username)?;
        statuses::delete_status(&resources.database, &username, &isbn).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::STATUS_DELETED)),
        )
            .into_response())
    }
}
