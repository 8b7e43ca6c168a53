use serde_json::{Value, json};

use crate::helpers::{TestApp, cookie_value, registration, set_cookie};

#[tokio::test]
async fn should_return_200_and_set_session_cookies() {
    let app = TestApp::new().await;
    app.post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;

    let response = app
        .post_login(&json!({ "username": "alice", "password": "P@ss1" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);

    let access_cookie = set_cookie(&response, "accessToken").expect("No access token cookie");
    let refresh_cookie = set_cookie(&response, "refreshToken").expect("No refresh token cookie");
    for cookie in [&access_cookie, &refresh_cookie] {
        assert!(cookie.contains("HttpOnly"), "{cookie}");
        assert!(cookie.contains("Secure"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
    }

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User logged in successfully");
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(body["data"]["accessToken"], cookie_value(&access_cookie));
    assert_eq!(body["data"]["refreshToken"], cookie_value(&refresh_cookie));
    assert_ne!(body["data"]["accessToken"], body["data"]["refreshToken"]);
}

#[tokio::test]
async fn should_accept_email_as_identifier() {
    let app = TestApp::new().await;
    app.post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;

    let response = app
        .post_login(&json!({ "email": "ALICE@x.com", "password": "P@ss1" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_prefer_username_when_both_identifiers_match_different_users() {
    let app = TestApp::new().await;
    app.post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;
    app.post_register(&registration("bob", "bob@x.com", "B0bpass"))
        .await;

    let response = app
        .post_login(&json!({ "username": "bob", "email": "alice@x.com", "password": "B0bpass" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["user"]["username"], "bob");
}

#[tokio::test]
async fn should_ignore_malformed_email_when_username_is_usable() {
    let app = TestApp::new().await;
    app.post_register(&registration("bob", "bob@x.com", "B0bpass"))
        .await;

    let response = app
        .post_login(&json!({ "username": "bob", "email": "bob-at-x.com", "password": "B0bpass" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["user"]["username"], "bob");
}

#[tokio::test]
async fn should_return_404_for_malformed_only_identifier() {
    let app = TestApp::new().await;
    app.post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;

    let test_cases = [
        json!({ "username": "Al Ice", "password": "P@ss1" }),
        json!({ "email": "alice-at-x.com", "password": "P@ss1" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_login(test_case).await;
        assert_eq!(response.status().as_u16(), 404, "{test_case}");
    }
}

#[tokio::test]
async fn should_return_401_for_wrong_password() {
    let app = TestApp::new().await;
    app.post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;

    let response = app
        .post_login(&json!({ "username": "alice", "password": "wrong" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert!(set_cookie(&response, "refreshToken").is_none());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Password incorrect");
}

#[tokio::test]
async fn should_return_404_for_unknown_user() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({ "username": "nobody", "password": "P@ss1" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_without_identifier() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "password": "P@ss1" }),
        json!({ "username": "", "email": " ", "password": "P@ss1" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_login(test_case).await;
        assert_eq!(response.status().as_u16(), 400, "{test_case}");
    }
}

#[tokio::test]
async fn should_return_error_envelope_for_malformed_json() {
    let app = TestApp::new().await;

    let response = app.post_login_raw("not json").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}
