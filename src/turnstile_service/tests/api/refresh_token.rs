use serde_json::Value;

use crate::helpers::{TestApp, cookie_value, set_cookie};

#[tokio::test]
async fn should_rotate_tokens_and_reject_reuse() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app.post_refresh_with_cookie(&session.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);

    let refresh_cookie = set_cookie(&response, "refreshToken").expect("No refresh token cookie");
    assert!(set_cookie(&response, "accessToken").is_some());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Access token refreshed");
    let rotated = body["data"]["refreshToken"].as_str().unwrap().to_owned();
    assert_eq!(rotated, cookie_value(&refresh_cookie));
    assert_ne!(rotated, session.refresh_token);

    let response = app.post_refresh_with_cookie(&session.refresh_token).await;
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Refresh token is expired or used");

    let response = app.post_refresh_with_cookie(&rotated).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_accept_refresh_token_in_body() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app.post_refresh_with_body(&session.refresh_token).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_without_token() {
    let app = TestApp::new().await;

    let response = app.post_refresh_without_token().await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized request");
}

#[tokio::test]
async fn should_return_401_for_malformed_or_foreign_token() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    for token in ["not-a-token", "a.b.c", session.access_token.as_str()] {
        let response = app.post_refresh_with_cookie(token).await;
        assert_eq!(response.status().as_u16(), 401, "{token}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Invalid token");
    }
}

#[tokio::test]
async fn should_invalidate_previous_login_on_new_login() {
    let app = TestApp::new().await;
    let first = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app
        .post_login(&serde_json::json!({ "username": "alice", "password": "P@ss1" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_refresh_with_cookie(&first.refresh_token).await;
    assert_eq!(response.status().as_u16(), 401);
}
