//! API integration tests
//!
//! Require a running server with a migrated database. The initial
//! migration seeds the development administrator used for login
//! (admin@gestepi.local / admin).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5500/api/v1";

/// Helper to get an authenticated admin token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@gestepi.local",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@gestepi.local",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@gestepi.local",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "admin@gestepi.local");
}

#[tokio::test]
#[ignore]
async fn test_list_epis() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_epi() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create equipment
    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Petzl",
            "model": "Volta 9.2",
            "serial_number": "TEST-ROPE-0001",
            "service_start_date": "2024-01-15",
            "periodicity": 6,
            "epi_type_id": 1,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let epi_id = body["id"].as_i64().expect("No equipment ID");
    assert_eq!(body["serial_number"], "TEST-ROPE-0001");

    // Delete equipment
    let response = client
        .delete(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_create_epi_invalid_periodicity() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Petzl",
            "model": "Volta 9.2",
            "serial_number": "TEST-ROPE-0002",
            "service_start_date": "2024-01-15",
            "periodicity": 0,
            "epi_type_id": 1,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_due_worklist() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/checks/due", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let entries = body.as_array().expect("Expected an array");

    // Sorted most overdue first, every entry within the 30-day window
    let mut previous = i64::MIN;
    for entry in entries {
        let days = entry["days_until_next_check"].as_i64().expect("No day count");
        assert!(days <= 30);
        assert!(days >= previous);
        previous = days;
        assert!(entry["urgency"].is_string());
    }
}

#[tokio::test]
#[ignore]
async fn test_record_check_for_epi() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create a piece of equipment to inspect
    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Petzl",
            "model": "Vertex",
            "serial_number": "TEST-HELM-0001",
            "service_start_date": "2024-01-15",
            "periodicity": 12,
            "epi_type_id": 4,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let epi: Value = response.json().await.expect("Failed to parse response");
    let epi_id = epi["id"].as_i64().expect("No equipment ID");

    // Record an inspection
    let response = client
        .post(format!("{}/checks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "check_date": "2024-06-01",
            "user_id": 1,
            "epi_id": epi_id,
            "status_id": 1,
            "remarks": "No visible damage"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Inspection history for the equipment
    let response = client
        .get(format!("{}/epis/{}/checks", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let history: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(history.as_array().expect("Expected an array").len(), 1);

    // Cleanup: cascades to the check
    let response = client
        .delete(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_check_before_service_start_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Beal",
            "model": "Antidote",
            "serial_number": "TEST-ROPE-0003",
            "service_start_date": "2024-06-01",
            "periodicity": 6,
            "epi_type_id": 1,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let epi: Value = response.json().await.expect("Failed to parse response");
    let epi_id = epi["id"].as_i64().expect("No equipment ID");

    let response = client
        .post(format!("{}/checks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "check_date": "2024-01-01",
            "user_id": 1,
            "epi_id": epi_id,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let _ = client
        .delete(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_move_check_before_service_start_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Edelrid",
            "model": "Jay III",
            "serial_number": "TEST-HARN-0001",
            "service_start_date": "2024-03-01",
            "periodicity": 6,
            "epi_type_id": 2,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let epi: Value = response.json().await.expect("Failed to parse response");
    let epi_id = epi["id"].as_i64().expect("No equipment ID");

    let response = client
        .post(format!("{}/checks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "check_date": "2024-06-01",
            "user_id": 1,
            "epi_id": epi_id,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let check: Value = response.json().await.expect("Failed to parse response");
    let check_id = check["id"].as_i64().expect("No inspection ID");

    // Moving the check date before the service start must fail
    let response = client
        .put(format!("{}/checks/{}", BASE_URL, check_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "check_date": "2024-01-01" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let _ = client
        .delete(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_move_service_start_past_checks_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/epis", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "brand": "Edelrid",
            "model": "Jay III",
            "serial_number": "TEST-HARN-0002",
            "service_start_date": "2024-03-01",
            "periodicity": 6,
            "epi_type_id": 2,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let epi: Value = response.json().await.expect("Failed to parse response");
    let epi_id = epi["id"].as_i64().expect("No equipment ID");

    let response = client
        .post(format!("{}/checks", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "check_date": "2024-05-01",
            "user_id": 1,
            "epi_id": epi_id,
            "status_id": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Moving the service start past the recorded inspection must fail
    let response = client
        .put(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "service_start_date": "2024-06-01" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // An earlier service start remains allowed
    let response = client
        .put(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "service_start_date": "2024-02-01" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let _ = client
        .delete(format!("{}/epis/{}", BASE_URL, epi_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_list_epi_types() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/epi-types", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body.as_array().expect("Expected an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_list_users() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_get_dashboard() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["epi_count"].is_number());
    assert!(body["by_type"].is_array());
    assert!(body["by_status"].is_array());
    assert!(body["pending_checks"]["total"].is_number());

    // Twelve months, zero-filled and ascending
    let history = body["checks_history"].as_array().expect("Expected an array");
    assert_eq!(history.len(), 12);
    let months: Vec<&str> = history
        .iter()
        .map(|e| e["month"].as_str().expect("No month"))
        .collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/epis", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
