use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_replace_password() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app
        .post_change_password(
            &session.access_token,
            &json!({ "oldPassword": "P@ss1", "newPassword": "N3wP@ss" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password changed successfully");

    let response = app
        .post_login(&json!({ "username": "alice", "password": "P@ss1" }))
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_login(&json!({ "username": "alice", "password": "N3wP@ss" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_keep_existing_refresh_token_valid() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app
        .post_change_password(
            &session.access_token,
            &json!({ "oldPassword": "P@ss1", "newPassword": "N3wP@ss" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_refresh_with_cookie(&session.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_400_for_wrong_old_password() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app
        .post_change_password(
            &session.access_token,
            &json!({ "oldPassword": "wrong", "newPassword": "N3wP@ss" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid old password");
}

#[tokio::test]
async fn should_return_400_for_missing_fields() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app
        .post_change_password(&session.access_token, &json!({ "oldPassword": "P@ss1" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_return_401_without_access_token() {
    let app = TestApp::new().await;

    let response = app
        .post_change_password(
            "invalid",
            &json!({ "oldPassword": "P@ss1", "newPassword": "N3wP@ss" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}
