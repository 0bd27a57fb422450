// ABOUTME: Integration tests for review and reading status endpoints
// ABOUTME: Covers CRUD flows, duplicate and dangling-reference errors, and token ownership
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use bookshelf_server::{
    models::{BookStatus, MessageResponse, ReadingStatus, Review},
    test_utils::{create_default_test_resources, sample_book},
};
use helpers::{app, axum_test::AxumTestRequest, stored_book, user_with_token};
use serde_json::{json, Value};

#[tokio::test]
async fn test_review_lifecycle() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    let token = user_with_token(&resources, "alice").await;

    let added: MessageResponse = AxumTestRequest::post("/api/reviews")
        .bearer(&token)
        .json(&json!({"isbn": "123", "username": "alice", "stars": 4, "text": "Lovely"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(added.message, "Added review.");

    let review: Review = AxumTestRequest::get("/api/reviews/alice/book/123")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(review.stars, 4);
    assert_eq!(review.text, "Lovely");
    assert_eq!(review.book.isbn, "123");

    AxumTestRequest::put("/api/reviews")
        .bearer(&token)
        .json(&json!({"isbn": "123", "username": "alice", "stars": 2, "text": "Changed my mind"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    let for_book: Vec<Review> = AxumTestRequest::get("/api/books/123/reviews")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(for_book.len(), 1);
    assert_eq!(for_book[0].stars, 2);
    assert!(for_book[0].date >= review.date);

    AxumTestRequest::delete("/api/reviews/alice/book/123")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::get("/api/reviews/alice/book/123")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The full listing answers 200 even when empty
    let all: Vec<Review> = AxumTestRequest::get("/api/reviews")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_duplicate_review_conflicts() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    let token = user_with_token(&resources, "alice").await;
    let body = json!({"isbn": "123", "username": "alice", "stars": 5, "text": ""});

    AxumTestRequest::post("/api/reviews")
        .bearer(&token)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let error: Value = AxumTestRequest::post("/api/reviews")
        .bearer(&token)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(error["error"]["message"], "Review already exists.");
}

#[tokio::test]
async fn test_review_for_unknown_book_is_not_found() {
    let resources = create_default_test_resources().await.unwrap();
    let token = user_with_token(&resources, "alice").await;

    let error: Value = AxumTestRequest::post("/api/reviews")
        .bearer(&token)
        .json(&json!({"isbn": "missing", "username": "alice", "stars": 3}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(error["error"]["message"], "Book or user doesn't exist.");
}

#[tokio::test]
async fn test_review_star_range_is_validated() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    let token = user_with_token(&resources, "alice").await;

    AxumTestRequest::post("/api/reviews")
        .bearer(&token)
        .json(&json!({"isbn": "123", "username": "alice", "stars": 6}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_review_mutations_need_matching_token() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    let _ = user_with_token(&resources, "alice").await;
    let mallory = user_with_token(&resources, "mallory").await;
    let body = json!({"isbn": "123", "username": "alice", "stars": 1});

    AxumTestRequest::post("/api/reviews")
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::post("/api/reviews")
        .bearer(&mallory)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(resources
        .database
        .reviews()
        .get("alice", "123")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_missing_review_is_not_found() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    let token = user_with_token(&resources, "alice").await;

    AxumTestRequest::put("/api/reviews")
        .bearer(&token)
        .json(&json!({"isbn": "123", "username": "alice", "stars": 3}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_lifecycle_with_filter() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "111").await;
    stored_book(&resources, "222").await;
    let token = user_with_token(&resources, "alice").await;

    for (isbn, status) in [("111", 0), ("222", 1)] {
        AxumTestRequest::post("/api/statuses")
            .bearer(&token)
            .json(&json!({"isbn": isbn, "username": "alice", "status": status}))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all: Vec<BookStatus> = AxumTestRequest::get("/api/statuses/alice")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all.len(), 2);

    let want: Vec<BookStatus> = AxumTestRequest::get("/api/statuses/alice?status=0")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(want.len(), 1);
    assert_eq!(want[0].book.isbn, "111");

    // Non-numeric filters are ignored
    let unfiltered: Vec<BookStatus> = AxumTestRequest::get("/api/statuses/alice?status=any")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(unfiltered.len(), 2);

    AxumTestRequest::put("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "111", "username": "alice", "status": 2}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    let status: BookStatus = AxumTestRequest::get("/api/statuses/alice/book/111")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(status.status, ReadingStatus::Read);

    AxumTestRequest::delete("/api/statuses/alice/book/111")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::get("/api/statuses/alice/book/111")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_status_with_embedded_book_stores_the_book() {
    let resources = create_default_test_resources().await.unwrap();
    let token = user_with_token(&resources, "alice").await;
    let book = sample_book("9780140449136");

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": book.isbn, "username": "alice", "status": 1, "book": book}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    assert!(resources
        .database
        .books()
        .exists("9780140449136")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_status_with_already_stored_book_still_succeeds() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "333").await;
    let token = user_with_token(&resources, "alice").await;

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "333", "username": "alice", "status": 2, "book": sample_book("333")}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_status_errors() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "111").await;
    let token = user_with_token(&resources, "alice").await;

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "111", "username": "alice", "status": 5}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "nope", "username": "alice", "status": 0}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "111", "username": "alice", "status": 0}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    AxumTestRequest::post("/api/statuses")
        .bearer(&token)
        .json(&json!({"isbn": "111", "username": "alice", "status": 1}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::delete("/api/statuses/alice/book/999")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::get("/api/statuses/nobody")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
