use fake::{Fake, faker::internet::en::SafeEmail};
use serde_json::{Value, json};

use crate::helpers::{TestApp, registration};

#[tokio::test]
async fn should_return_201_with_sanitized_profile() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let response = app
        .post_register(&json!({
            "fullName": "Alice Liddell",
            "email": email,
            "username": "Alice",
            "password": "P@ss1",
            "avatar": "https://cdn.example.com/alice.png",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], email.to_lowercase());
    assert_eq!(body["data"]["avatar"], "https://cdn.example.com/alice.png");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("refreshToken").is_none());
}

#[tokio::test]
async fn should_return_400_when_a_field_is_missing() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "email": "alice@x.com", "username": "alice", "password": "P@ss1" }),
        json!({ "fullName": "Alice", "username": "alice", "password": "P@ss1" }),
        json!({ "fullName": "Alice", "email": "alice@x.com", "password": "P@ss1" }),
        json!({ "fullName": "Alice", "email": "alice@x.com", "username": "alice" }),
        json!({ "fullName": " ", "email": "alice@x.com", "username": "alice", "password": "P@ss1" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_register(test_case).await;
        assert_eq!(response.status().as_u16(), 400, "{test_case}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"], "All fields are required");
    }
}

#[tokio::test]
async fn should_return_400_for_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&registration("alice", "not-an-email", "P@ss1"))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_return_409_for_taken_username_or_email() {
    let app = TestApp::new().await;
    let response = app
        .post_register(&registration("alice", "alice@x.com", "P@ss1"))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app
        .post_register(&registration("ALICE", "other@x.com", "P@ss1"))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .post_register(&registration("bob", "Alice@X.com", "P@ss1"))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}
