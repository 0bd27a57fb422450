// ABOUTME: Book route handlers for lookup, creation, metadata search, and rankings
// ABOUTME: Rankings answer 204 when the limit is below one or nothing qualifies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{found_or_no_content, list_or_no_content, parse_status_filter, JsonBody};
use crate::constants::messages;
use crate::errors::AppError;
use crate::external::SearchField;
use crate::models::{Book, MessageResponse, ResultLimit};
use crate::resources::ServerResources;
use crate::services::{books, reviews};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// `?limit=`
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    /// Kept as text and read up to the first non-digit
    pub limit: Option<String>,
}

/// `?status=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct RankingQuery {
    /// Status code filter
    pub status: Option<String>,
    /// Result limit
    pub limit: Option<String>,
}

/// Book routes implementation
pub struct BookRoutes;

impl BookRoutes {
    /// Create all book routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/books", post(Self::handle_add))
            .route(
                "/api/books/search/title/:title",
                get(Self::handle_search_title),
            )
            .route(
                "/api/books/search/author/:author",
                get(Self::handle_search_author),
            )
            .route("/api/books/highest-rated", get(Self::handle_highest_rated))
            .route(
                "/api/books/recently-updated",
                get(Self::handle_recently_updated),
            )
            .route("/api/books/popular", get(Self::handle_popular))
            .route("/api/books/:isbn", get(Self::handle_get))
            .route("/api/books/:isbn/reviews", get(Self::handle_get_reviews))
            .with_state(resources)
    }

    async fn search(
        resources: &ServerResources,
        field: SearchField,
        keyword: &str,
        query: &LimitQuery,
    ) -> Result<Response, AppError> {
        let limit = ResultLimit::parse(query.limit.as_deref());
        let found = books::search_books(
            resources.metadata_provider.as_ref(),
            field,
            keyword,
            limit,
        )
        .await?;
        Ok(list_or_no_content(found))
    }

    async fn handle_search_title(
        State(resources): State<Arc<ServerResources>>,
        Path(title): Path<String>,
        Query(query): Query<LimitQuery>,
    ) -> Result<Response, AppError> {
        Self::search(&resources, SearchField::Title, &title, &query).await
    }

    async fn handle_search_author(
        State(resources): State<Arc<ServerResources>>,
        Path(author): Path<String>,
        Query(query): Query<LimitQuery>,
    ) -> Result<Response, AppError> {
        Self::search(&resources, SearchField::Author, &author, &query).await
    }

    async fn handle_highest_rated(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<LimitQuery>,
    ) -> Result<Response, AppError> {
        let limit = ResultLimit::parse(query.limit.as_deref());
        let ranked = books::get_highest_rated_books(&resources.database, limit).await?;
        Ok(list_or_no_content(ranked))
    }

    async fn handle_recently_updated(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RankingQuery>,
    ) -> Result<Response, AppError> {
        let status = parse_status_filter(query.status.as_deref())?;
        let limit = ResultLimit::parse(query.limit.as_deref());
        let ranked = books::get_recently_updated_books(&resources.database, status, limit).await?;
        Ok(list_or_no_content(ranked))
    }

    async fn handle_popular(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RankingQuery>,
    ) -> Result<Response, AppError> {
        let status = parse_status_filter(query.status.as_deref())?;
        let limit = ResultLimit::parse(query.limit.as_deref());
        let ranked = books::get_popular_books(
            &resources.database,
            status,
            limit,
            resources.config.rankings.popular_window_days,
            Utc::now(),
        )
        .await?;
        Ok(list_or_no_content(ranked))
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(isbn): Path<String>,
    ) -> Result<Response, AppError> {
        let book = books::get_book(&resources.database, &isbn).await?;
        Ok(found_or_no_content(book))
    }

    async fn handle_get_reviews(
        State(resources): State<Arc<ServerResources>>,
        Path(isbn): Path<String>,
    ) -> Result<Response, AppError> {
        let found = reviews::get_book_reviews(&resources.database, &isbn).await?;
        Ok(list_or_no_content(found))
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(book): JsonBody<Book>,
    ) -> Result<Response, AppError> {
        books::add_book(&resources.database, &book).await?;
        Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new(messages::BOOK_ADDED)),
        )
            .into_response())
    }
}
