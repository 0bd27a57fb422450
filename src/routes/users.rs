// ABOUTME: Account route handlers: registration, login, profile lookup, and credential updates
// ABOUTME: Profiles never include the password hash
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{found_or_no_content, JsonBody};
use crate::constants::messages;
use crate::errors::AppError;
use crate::middleware::AuthenticatedUser;
use crate::models::{LoginRequest, MessageResponse, RegisterUserRequest, UpdateUserRequest};
use crate::resources::ServerResources;
use crate::services::users;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users",
                post(Self::handle_register).put(Self::handle_update),
            )
            .route("/api/users/login", post(Self::handle_login))
            .route("/api/users/:username", get(Self::handle_get))
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        let profile = users::get_user(&resources.database, &username).await?;
        Ok(found_or_no_content(profile))
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RegisterUserRequest>,
    ) -> Result<Response, AppError> {
        users::register_user(
            &resources.database,
            &request,
            resources.config.auth.bcrypt_cost,
        )
        .await?;
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(messages::USER_ADDED)),
        )
            .into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let session = users::login(&resources.database, &resources.auth_manager, &request).await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(request): JsonBody<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        user.ensure_is(&request.username)?;
        users::update_user(
            &resources.database,
            &request,
            resources.config.auth.bcrypt_cost,
        )
        .await?;
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::USER_UPDATED)),
        )
            .into_response())
    }
}
