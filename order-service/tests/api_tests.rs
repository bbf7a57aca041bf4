mod common;

use chrono::Duration;
use common::TestApp;
use common::DIRECTOR_PASSWORD;
use common::DIRECTOR_USERNAME;
use order_service::domain::user::models::Role;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": DIRECTOR_USERNAME,
            "password": DIRECTOR_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert!(body["data"]["access"].is_string());
    assert!(body["data"]["refresh"].is_string());
    assert_ne!(body["data"]["access"], body["data"]["refresh"]);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": "nobody",
            "password": "whatever"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "user not found");
}

#[tokio::test]
async fn test_login_incorrect_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": DIRECTOR_USERNAME,
            "password": "not-the-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "incorrect password");
}

#[tokio::test]
async fn test_check_access_reports_identity() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .get_authenticated("/api/v1/auth/access", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_id"], app.director_id.to_string());
    assert_eq!(body["data"]["user_role"], "director");
}

#[tokio::test]
async fn test_check_access_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/auth/access")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_access_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/v1/auth/access", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "invalid token");
}

#[tokio::test]
async fn test_expired_access_token_then_refresh() {
    let app = TestApp::spawn().await;
    let (access, refresh) = app.login(DIRECTOR_USERNAME, DIRECTOR_PASSWORD).await;

    app.clock.advance(Duration::minutes(16));

    let response = app
        .get_authenticated("/api/v1/auth/access", &access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("expired"));

    let response = app
        .post("/api/v1/auth/refresh")
        .json(&json!({ "refresh": refresh }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let new_access = body["data"]["access"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/v1/auth/access", &new_access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::spawn().await;
    let (access, _) = app.login(DIRECTOR_USERNAME, DIRECTOR_PASSWORD).await;

    let response = app
        .post("/api/v1/auth/refresh")
        .json(&json!({ "refresh": access }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_route_rejects_refresh_token() {
    let app = TestApp::spawn().await;
    let (_, refresh) = app.login(DIRECTOR_USERNAME, DIRECTOR_PASSWORD).await;

    let response = app
        .get_authenticated("/api/v1/auth/access", &refresh)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_director_registers_employee() {
    let app = TestApp::spawn().await;

    let user_id = app.register(Role::Employee, "alice", "s3cret!").await;

    let (access, _) = app.login("alice", "s3cret!").await;
    let response = app
        .get_authenticated("/api/v1/auth/access", &access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_id"], user_id);
    assert_eq!(body["data"]["user_role"], "employee");
}

#[tokio::test]
async fn test_employee_cannot_register() {
    let app = TestApp::spawn().await;
    app.register(Role::Employee, "alice", "s3cret!").await;
    let (access, _) = app.login("alice", "s3cret!").await;
    let before = app.users.len().await;

    let response = app
        .post_authenticated("/api/v1/auth/registration", &access)
        .json(&json!({
            "role_id": 1,
            "username": "bob",
            "password": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.users.len().await, before);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .post_authenticated("/api/v1/auth/registration", &token)
        .json(&json!({
            "role_id": 1,
            "username": DIRECTOR_USERNAME,
            "password": "another"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    for body in [
        json!({ "role_id": 1, "username": "n", "password": "s3cret!" }),
        json!({ "role_id": 7, "username": "alice", "password": "s3cret!" }),
        json!({ "role_id": 1, "username": "alice", "password": "" }),
    ] {
        let response = app
            .post_authenticated("/api/v1/auth/registration", &token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert_eq!(app.users.len().await, 1);
}

#[tokio::test]
async fn test_orders_are_scoped_by_role() {
    let app = TestApp::spawn().await;
    app.register(Role::Employee, "alice", "s3cret!").await;
    app.register(Role::Employee, "bob", "hunter2").await;
    let (alice, _) = app.login("alice", "s3cret!").await;
    let (bob, _) = app.login("bob", "hunter2").await;
    let director = app.director_token().await;

    app.create_order(&alice, "+15550100").await;
    app.create_order(&alice, "+15550101").await;
    app.create_order(&bob, "+15550100").await;

    let response = app
        .get_authenticated("/api/v1/orders/0", &alice)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = app
        .get_authenticated("/api/v1/orders/0", &director)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let response = app
        .get_authenticated("/api/v1/orders/0?phone=%2B15550100", &director)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = app
        .get_authenticated("/api/v1/orders/2", &director)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_orders_unknown_status() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .get_authenticated("/api/v1/orders/9", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_order_unknown_product() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .post_authenticated("/api/v1/orders/new-order", &token)
        .json(&json!({
            "phone": "+15550100",
            "email": "buyer@example.com",
            "description": "two pallets",
            "product_id": uuid::Uuid::new_v4().to_string()
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_order_status() {
    let app = TestApp::spawn().await;
    app.register(Role::Employee, "alice", "s3cret!").await;
    app.register(Role::Employee, "bob", "hunter2").await;
    let (alice, _) = app.login("alice", "s3cret!").await;
    let (bob, _) = app.login("bob", "hunter2").await;
    let director = app.director_token().await;

    let order_id = app.create_order(&alice, "+15550100").await;
    let path = format!("/api/v1/orders/order/{}", order_id);

    let response = app
        .post_authenticated(&path, &bob)
        .json(&json!({ "status": 2 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_authenticated(&path, &director)
        .json(&json!({ "status": 2 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/api/v1/orders/2", &alice)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let orders = body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order_id);
    assert_eq!(orders[0]["status"], 2);
}

#[tokio::test]
async fn test_update_missing_order() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .post_authenticated(
            &format!("/api/v1/orders/order/{}", uuid::Uuid::new_v4()),
            &token,
        )
        .json(&json!({ "status": 3 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_identifiers_are_unprocessable() {
    let app = TestApp::spawn().await;
    let token = app.director_token().await;

    let response = app
        .post_authenticated("/api/v1/orders/order/not-a-uuid", &token)
        .json(&json!({ "status": 2 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_authenticated("/api/v1/orders/new-order", &token)
        .json(&json!({
            "phone": "+15550100",
            "email": "buyer@example.com",
            "description": "two pallets",
            "product_id": "not-a-uuid"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_serves_index_page() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/app")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.expect("Failed to read body");
    assert!(text.contains("<html"));
}
