// ABOUTME: Integration tests for registration, login, profiles, and token enforcement
// ABOUTME: Tokens are checked for presence, signature, expiry, and ownership
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use axum::http::StatusCode;
use bookshelf_server::{
    auth::AuthManager,
    models::{LoginResponse, UserProfile},
    test_utils::create_default_test_resources,
};
use chrono::Utc;
use helpers::{app, axum_test::AxumTestRequest, bearer};
use serde_json::{json, Value};

fn registration(username: &str, email: &str) -> Value {
    json!({"username": username, "email": email, "password": "correct horse"})
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let resources = create_default_test_resources().await.unwrap();

    AxumTestRequest::post("/api/users")
        .json(&registration("alice", "alice@example.com"))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let session: LoginResponse = AxumTestRequest::post("/api/users/login")
        .json(&json!({"username": "alice", "password": "correct horse"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(session.expires_at > Utc::now());
    assert_eq!(
        resources
            .auth_manager
            .validate_token(&session.token)
            .unwrap()
            .sub,
        "alice"
    );

    let response = AxumTestRequest::get("/api/users/alice")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);
    let raw: Value = serde_json::from_str(&response.text()).unwrap();
    assert!(raw.get("password").is_none());
    assert!(raw.get("password_hash").is_none());

    let profile: UserProfile = serde_json::from_value(raw).unwrap();
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.joined, Utc::now().date_naive());
}

#[tokio::test]
async fn test_unknown_profile_is_no_content() {
    let resources = create_default_test_resources().await.unwrap();

    AxumTestRequest::get("/api/users/ghost")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_register_conflicts_and_validation() {
    let resources = create_default_test_resources().await.unwrap();

    AxumTestRequest::post("/api/users")
        .json(&registration("alice", "alice@example.com"))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    for body in [
        registration("alice", "other@example.com"),
        registration("bob", "alice@example.com"),
    ] {
        let error: Value = AxumTestRequest::post("/api/users")
            .json(&body)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CONFLICT)
            .json();
        assert_eq!(error["error"]["message"], "Username or e-mail already exists.");
    }

    AxumTestRequest::post("/api/users")
        .json(&json!({"username": "carol", "email": "not-an-email", "password": "correct horse"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::post("/api/users")
        .json(&json!({"username": "carol", "email": "carol@example.com", "password": "short"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let resources = create_default_test_resources().await.unwrap();

    AxumTestRequest::post("/api/users")
        .json(&registration("alice", "alice@example.com"))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    for body in [
        json!({"username": "alice", "password": "wrong password"}),
        json!({"username": "nobody", "password": "correct horse"}),
    ] {
        let error: Value = AxumTestRequest::post("/api/users/login")
            .json(&body)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::UNAUTHORIZED)
            .json();
        assert_eq!(error["error"]["code"], "AUTH_INVALID");
    }
}

#[tokio::test]
async fn test_update_user() {
    let resources = create_default_test_resources().await.unwrap();
    for (username, email) in [("alice", "alice@example.com"), ("bob", "bob@example.com")] {
        AxumTestRequest::post("/api/users")
            .json(&registration(username, email))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let (token, _) = resources.auth_manager.generate_token("alice").unwrap();

    let error: Value = AxumTestRequest::put("/api/users")
        .bearer(&token)
        .json(&json!({"username": "alice", "email": "bob@example.com", "password": "new password"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(error["error"]["message"], "E-mail already exists.");

    AxumTestRequest::put("/api/users")
        .bearer(&token)
        .json(&json!({"username": "alice", "email": "alice@books.example", "password": "new password"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::post("/api/users/login")
        .json(&json!({"username": "alice", "password": "new password"}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    let profile: UserProfile = AxumTestRequest::get("/api/users/alice")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile.email, "alice@books.example");
}

#[tokio::test]
async fn test_token_enforcement() {
    let resources = create_default_test_resources().await.unwrap();
    AxumTestRequest::post("/api/users")
        .json(&registration("alice", "alice@example.com"))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);
    let body = json!({"username": "alice", "email": "alice@example.com", "password": "another one"});

    let missing: Value = AxumTestRequest::put("/api/users")
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(missing["error"]["code"], "AUTH_REQUIRED");

    let forged = AuthManager::new(b"some-other-secret", 1)
        .generate_token("alice")
        .unwrap()
        .0;
    AxumTestRequest::put("/api/users")
        .bearer(&forged)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (someone_else, _) = resources.auth_manager.generate_token("bob").unwrap();
    AxumTestRequest::put("/api/users")
        .bearer(&someone_else)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::put("/api/users")
        .header("authorization", "Token abc")
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (token, _) = resources.auth_manager.generate_token("alice").unwrap();
    AxumTestRequest::put("/api/users")
        .header("x-access-token", &token)
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::put("/api/users")
        .header("authorization", &bearer(&token))
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);
}
