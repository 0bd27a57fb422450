// ABOUTME: Review route handlers: listings, keyed lookup, and authenticated mutations
// ABOUTME: Mutations require a token issued to the review's author
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{found_or_no_content, JsonBody};
use crate::constants::messages;
use crate::errors::AppError;
use crate::middleware::AuthenticatedUser;
use crate::models::{MessageResponse, ReviewRequest};
use crate::resources::ServerResources;
use crate::services::reviews;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Review routes implementation
pub struct ReviewRoutes;

impl ReviewRoutes {
    /// Create all review routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/reviews",
                get(Self::handle_list)
                    .post(Self::handle_add)
                    .put(Self::handle_update),
            )
            .route(
                "/api/reviews/:username/book/:isbn",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let all = reviews::get_reviews(&resources.database).await?;
        Ok((StatusCode::OK, Json(all)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path((username, isbn)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let review = reviews::get_review(&resources.database, &username, &isbn).await?;
        Ok(found_or_no_content(review))
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(request): JsonBody<ReviewRequest>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&request.username)?;
        reviews::add_review(&resources.database, &request).await?;
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(messages::REVIEW_ADDED)),
        )
            .into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(request): JsonBody<ReviewRequest>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&request.username)?;
        reviews::update_review(&resources.database, &request).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::REVIEW_UPDATED)),
        )
            .into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        Path((username, isbn)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&username)?;
        reviews::delete_review(&resources.database, &username, &isbn).await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::REVIEW_DELETED)),
        )
            .into_response())
    }
}
