// ABOUTME: Integration tests for the highest-rated, recently-updated, and popular rankings
// ABOUTME: Seeds reviews and statuses directly so dates can be controlled
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use bookshelf_server::{
    database::Database,
    errors::ErrorCode,
    models::{PopularBook, RatedBook, ReadingStatus, RecentBook, ResultLimit},
    services::books::get_popular_books,
    test_utils::{create_default_test_resources, create_test_user},
};
use chrono::{Duration, TimeZone, Utc};
use helpers::{app, axum_test::AxumTestRequest, stored_book};

async fn review(db: &Database, isbn: &str, username: &str, stars: u8) {
    db.reviews()
        .create(isbn, username, stars, "", Utc::now())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_highest_rated_averages_and_orders() {
    let resources = create_default_test_resources().await.unwrap();
    let db = &resources.database;
    for isbn in ["123", "456", "789"] {
        stored_book(&resources, isbn).await;
    }
    for username in ["alice", "bob"] {
        create_test_user(db, username, "password123").await.unwrap();
    }

    review(db, "123", "alice", 4).await;
    review(db, "123", "bob", 5).await;
    review(db, "456", "alice", 2).await;
    review(db, "789", "bob", 5).await;

    let ranked: Vec<RatedBook> = AxumTestRequest::get("/api/books/highest-rated")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    let isbns: Vec<&str> = ranked.iter().map(|r| r.book.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["789", "123", "456"]);
    assert!((ranked[1].average_rating - 4.5).abs() < f64::EPSILON);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].average_rating >= pair[1].average_rating));

    let limited: Vec<RatedBook> = AxumTestRequest::get("/api/books/highest-rated?limit=1")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].book.isbn, "789");
}

#[tokio::test]
async fn test_rankings_with_zero_limit_are_no_content() {
    let resources = create_default_test_resources().await.unwrap();
    stored_book(&resources, "123").await;
    create_test_user(&resources.database, "alice", "password123")
        .await
        .unwrap();
    review(&resources.database, "123", "alice", 3).await;

    for uri in [
        "/api/books/highest-rated?limit=0",
        "/api/books/recently-updated?limit=0",
        "/api/books/popular?limit=-2",
    ] {
        AxumTestRequest::get(uri)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_rankings_without_data_are_no_content() {
    let resources = create_default_test_resources().await.unwrap();

    for uri in [
        "/api/books/highest-rated",
        "/api/books/recently-updated",
        "/api/books/popular",
    ] {
        AxumTestRequest::get(uri)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_recently_updated_orders_by_latest_status() {
    let resources = create_default_test_resources().await.unwrap();
    let db = &resources.database;
    let now = Utc::now();
    for isbn in ["aaa", "bbb"] {
        stored_book(&resources, isbn).await;
    }
    for username in ["alice", "bob"] {
        create_test_user(db, username, "password123").await.unwrap();
    }

    let statuses = db.statuses();
    statuses
        .create("aaa", "alice", ReadingStatus::Reading, now - Duration::days(3))
        .await
        .unwrap();
    statuses
        .create("aaa", "bob", ReadingStatus::Read, now - Duration::hours(1))
        .await
        .unwrap();
    statuses
        .create("bbb", "alice", ReadingStatus::Reading, now - Duration::days(1))
        .await
        .unwrap();

    let recent: Vec<RecentBook> = AxumTestRequest::get("/api/books/recently-updated")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let isbns: Vec<&str> = recent.iter().map(|r| r.book.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["aaa", "bbb"]);

    // Filtering by status only considers matching records
    let reading: Vec<RecentBook> = AxumTestRequest::get("/api/books/recently-updated?status=1")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let isbns: Vec<&str> = reading.iter().map(|r| r.book.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["bbb", "aaa"]);

    AxumTestRequest::get("/api/books/recently-updated?status=0")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    AxumTestRequest::get("/api/books/recently-updated?status=7")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_popular_respects_window_and_counts() {
    let resources = create_default_test_resources().await.unwrap();
    let db = &resources.database;
    let now = Utc::now();
    for isbn in ["old", "hot", "warm"] {
        stored_book(&resources, isbn).await;
    }
    for username in ["alice", "bob", "carol"] {
        create_test_user(db, username, "password123").await.unwrap();
    }

    let statuses = db.statuses();
    for username in ["alice", "bob", "carol"] {
        statuses
            .create("old", username, ReadingStatus::Read, now - Duration::days(90))
            .await
            .unwrap();
    }
    statuses
        .create("hot", "alice", ReadingStatus::Reading, now - Duration::days(2))
        .await
        .unwrap();
    statuses
        .create("hot", "bob", ReadingStatus::WantToRead, now - Duration::days(1))
        .await
        .unwrap();
    statuses
        .create("warm", "carol", ReadingStatus::Reading, now - Duration::days(5))
        .await
        .unwrap();

    let popular: Vec<PopularBook> = AxumTestRequest::get("/api/books/popular")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let ranked: Vec<(&str, u32)> = popular
        .iter()
        .map(|p| (p.book.isbn.as_str(), p.count))
        .collect();
    assert_eq!(ranked, vec![("hot", 2), ("warm", 1)]);

    let reading: Vec<PopularBook> = AxumTestRequest::get("/api/books/popular?status=1")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let ranked: Vec<(&str, u32)> = reading
        .iter()
        .map(|p| (p.book.isbn.as_str(), p.count))
        .collect();
    assert_eq!(ranked, vec![("hot", 1), ("warm", 1)]);
}

#[tokio::test]
async fn test_highest_rated_ties_break_by_isbn() {
    let resources = create_default_test_resources().await.unwrap();
    let db = &resources.database;
    for isbn in ["222", "111", "333"] {
        stored_book(&resources, isbn).await;
    }
    create_test_user(db, "alice", "password123").await.unwrap();

    review(db, "222", "alice", 4).await;
    review(db, "333", "alice", 4).await;
    review(db, "111", "alice", 4).await;

    let ranked: Vec<RatedBook> = AxumTestRequest::get("/api/books/highest-rated")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    let isbns: Vec<&str> = ranked.iter().map(|r| r.book.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["111", "222", "333"]);
}

#[tokio::test]
async fn test_popular_window_start_is_inclusive() {
    let resources = create_default_test_resources().await.unwrap();
    let db = &resources.database;
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let window_start = now - Duration::days(30);
    for isbn in ["edge", "stale"] {
        stored_book(&resources, isbn).await;
    }
    create_test_user(db, "alice", "password123").await.unwrap();

    db.statuses()
        .create("edge", "alice", ReadingStatus::Reading, window_start)
        .await
        .unwrap();
    db.statuses()
        .create(
            "stale",
            "alice",
            ReadingStatus::Reading,
            window_start - Duration::microseconds(1),
        )
        .await
        .unwrap();

    let popular = get_popular_books(db, None, ResultLimit::Take(10), 30, now)
        .await
        .unwrap();
    let ranked: Vec<(&str, u32)> = popular
        .iter()
        .map(|p| (p.book.isbn.as_str(), p.count))
        .collect();
    assert_eq!(ranked, vec![("edge", 1)]);
}

#[tokio::test]
async fn test_popular_window_outside_calendar_is_an_error() {
    let resources = create_default_test_resources().await.unwrap();

    let error = get_popular_books(
        &resources.database,
        None,
        ResultLimit::Take(5),
        100_000_000,
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
}
