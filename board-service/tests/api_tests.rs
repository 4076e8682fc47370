mod common;

use auth::AccessClaims;
use board_service::config::TokenStrategyKind;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "nicola");
    assert!(body["token"].is_string());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    // Create first user
    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Try to register the same username again
    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_duplicate_keeps_original_password() {
    let app = TestApp::spawn().await;

    // Create first user
    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "Original_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // A rejected duplicate must not overwrite the stored credentials
    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "Other_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let original = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "Original_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(original.status(), StatusCode::OK);

    let rejected = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "Other_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "n",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    // Create user
    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Authenticate
    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "nicola");
    assert!(body["token"].is_string());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    // Create user
    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Try to authenticate with wrong password
    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nonexistent",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("User not found"));
}

#[tokio::test]
async fn test_whoami_success() {
    let app = TestApp::spawn().await;

    // Create user and capture the issued token
    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = register_body["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/whoami", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());
    assert_eq!(body["username"], "nicola");
}

#[tokio::test]
async fn test_whoami_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/whoami")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing access credential");
}

#[tokio::test]
async fn test_whoami_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/whoami", "not-a-real-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_whoami_via_x_token_header() {
    let app = TestApp::spawn().await;

    // Create user and capture the issued token
    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = register_body["token"].as_str().unwrap();

    // X-Token is accepted when no Authorization header is present
    let response = app
        .get("/api/whoami")
        .header("X-Token", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "nicola");
}

#[tokio::test]
async fn test_whoami_with_expired_token() {
    let app = TestApp::spawn().await;

    // Create user and resolve the real user ID
    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = register_body["token"].as_str().unwrap();

    let whoami_response = app
        .get_authenticated("/api/whoami", token)
        .send()
        .await
        .expect("Failed to execute request");

    let whoami_body: serde_json::Value = whoami_response
        .json()
        .await
        .expect("Failed to parse response");
    let user_id = whoami_body["id"].as_str().unwrap().to_string();

    // Mint a token for the existing user that expired an hour ago
    let claims = AccessClaims::for_user(&user_id, "nicola".to_string(), Duration::hours(-1));
    let expired = app
        .jwt_handler
        .encode(&claims)
        .expect("Failed to encode token");

    let response = app
        .get_authenticated("/api/whoami", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_whoami_token_for_unknown_user() {
    let app = TestApp::spawn().await;

    // A well-signed token is still rejected when no such user exists
    let claims = AccessClaims::for_user(
        uuid::Uuid::new_v4(),
        "ghost".to_string(),
        Duration::hours(2),
    );
    let token = app
        .jwt_handler
        .encode(&claims)
        .expect("Failed to encode token");

    let response = app
        .get_authenticated("/api/whoami", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User no longer exists");
}

#[tokio::test]
async fn test_cors_preflight_requires_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/api/whoami", app.address),
        )
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signed_login_does_not_invalidate_previous_token() {
    let app = TestApp::spawn().await;

    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let first_token = register_body["token"].as_str().unwrap().to_string();

    let login_response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let second_token = login_body["token"].as_str().unwrap().to_string();

    // Signed tokens are self-contained, so both remain valid
    let first = app
        .get_authenticated("/api/whoami", &first_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .get_authenticated("/api/whoami", &second_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_opaque_round_trip() {
    let app = TestApp::spawn_with(TokenStrategyKind::Opaque).await;

    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(register_response.status(), StatusCode::OK);

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = register_body["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/whoami", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "nicola");
}

#[tokio::test]
async fn test_opaque_login_supersedes_previous_token() {
    let app = TestApp::spawn_with(TokenStrategyKind::Opaque).await;

    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let first_token = register_body["token"].as_str().unwrap().to_string();

    let login_response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let second_token = login_body["token"].as_str().unwrap().to_string();

    assert_ne!(first_token, second_token);

    // Only the latest stored token authenticates
    let first = app
        .get_authenticated("/api/whoami", &first_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    let second = app
        .get_authenticated("/api/whoami", &second_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_whoami_isolated_identities() {
    let app = TestApp::spawn().await;

    let mut tokens = Vec::new();
    for username in ["alice", "bob"] {
        let response = app
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        tokens.push(body["token"].as_str().unwrap().to_string());
    }

    // Each in-flight request resolves its own identity
    let (alice_response, bob_response) = tokio::join!(
        app.get_authenticated("/api/whoami", &tokens[0]).send(),
        app.get_authenticated("/api/whoami", &tokens[1]).send(),
    );

    let alice_body: serde_json::Value = alice_response
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(alice_body["username"], "alice");

    let bob_body: serde_json::Value = bob_response
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(bob_body["username"], "bob");
}

#[tokio::test]
async fn test_full_auth_workflow() {
    let app = TestApp::spawn().await;

    // 1. Register
    let register_response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(register_response.status(), StatusCode::OK);

    let register_body: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(register_body["username"], "nicola");

    // 2. Login
    let login_response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(login_response.status(), StatusCode::OK);

    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["token"].as_str().unwrap().to_string();

    // 3. Access protected endpoint
    let whoami_response = app
        .get_authenticated("/api/whoami", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(whoami_response.status(), StatusCode::OK);

    let whoami_body: serde_json::Value = whoami_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(whoami_body["username"], "nicola");

    // 4. Try to access with invalid token - should fail
    let invalid_response = app
        .get_authenticated("/api/whoami", "invalid")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(invalid_response.status(), StatusCode::UNAUTHORIZED);
}
