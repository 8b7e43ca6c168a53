use serde_json::Value;

use crate::helpers::{TestApp, set_cookie};

#[tokio::test]
async fn should_clear_cookies_and_end_session() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let response = app.post_logout_with_cookie(&session.access_token).await;
    assert_eq!(response.status().as_u16(), 200);

    for name in ["accessToken", "refreshToken"] {
        let cookie = set_cookie(&response, name).expect("No removal cookie");
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
    }

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User logged out");
    assert_eq!(body["success"], true);

    let response = app.post_refresh_with_cookie(&session.refresh_token).await;
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized request");
}

#[tokio::test]
async fn should_be_repeatable() {
    let app = TestApp::new().await;
    let session = app.signed_in("alice", "alice@x.com", "P@ss1").await;

    let first = app.post_logout_with_cookie(&session.access_token).await;
    let second = app.post_logout_with_cookie(&session.access_token).await;

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_without_access_token() {
    let app = TestApp::new().await;

    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post_logout_with_cookie("invalid").await;
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid access token");
}
