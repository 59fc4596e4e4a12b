//! API integration tests
//!
//! These run against a live server with a reachable database:
//!     cargo run &
//!     cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8000";

/// Unique suffix so repeated runs do not trip the uniqueness constraints
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_device_type(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/device-types", BASE_URL))
        .json(&json!({ "type_name": unique("Laptop") }))
        .send()
        .await
        .expect("Failed to create device type");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    body["device_type_id"].as_i64().expect("No device type ID")
}

async fn create_user(client: &Client, is_active: bool) -> i64 {
    let login = unique("jdoe");
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "username": login,
            "email": format!("{}@example.com", login),
            "is_active": is_active
        }))
        .send()
        .await
        .expect("Failed to create user");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    body["user_id"].as_i64().expect("No user ID")
}

async fn create_device(client: &Client, device_type_id: i64) -> (i64, String) {
    let serial = unique("SN");
    let response = client
        .post(format!("{}/devices", BASE_URL))
        .json(&json!({
            "device_type_id": device_type_id,
            "serial_number": serial
        }))
        .send()
        .await
        .expect("Failed to create device");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    (body["device_id"].as_i64().expect("No device ID"), serial)
}

async fn create_assignment(client: &Client, device_id: i64, user_id: i64) -> Value {
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({ "device_id": device_id, "user_id": user_id }))
        .send()
        .await
        .expect("Failed to create assignment");
    assert!(response.status().is_success());

    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
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
async fn test_full_checkout_lifecycle() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;
    let (device_id, _) = create_device(&client, type_id).await;

    // Checkout
    let assignment = create_assignment(&client, device_id, user_id).await;
    let assignment_id = assignment["assignment_id"].as_i64().expect("No assignment ID");
    assert!(assignment["actual_return_date"].is_null());

    // Device now reads as checked out
    let response = client
        .get(format!("{}/devices/{}", BASE_URL, device_id))
        .send()
        .await
        .expect("Failed to fetch device");
    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["is_checked_out"], true);
    assert_eq!(
        device["active_assignment"]["assignment_id"].as_i64(),
        Some(assignment_id)
    );

    // Return
    let response = client
        .put(format!("{}/assignments/{}/return", BASE_URL, assignment_id))
        .json(&json!({ "return_condition": "good" }))
        .send()
        .await
        .expect("Failed to return device");
    assert!(response.status().is_success());

    let returned: Value = response.json().await.expect("Failed to parse response");
    assert!(!returned["actual_return_date"].is_null());
    assert_eq!(returned["return_condition"], "good");

    // Device is available again
    let response = client
        .get(format!("{}/devices/{}", BASE_URL, device_id))
        .send()
        .await
        .expect("Failed to fetch device");
    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["is_checked_out"], false);
    assert!(device["active_assignment"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_rejected() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let (_, serial) = create_device(&client, type_id).await;

    let response = client
        .post(format!("{}/devices", BASE_URL))
        .json(&json!({ "device_type_id": type_id, "serial_number": serial }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore]
async fn test_update_serial_no_self_conflict() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let (first_id, first_serial) = create_device(&client, type_id).await;
    let (second_id, _) = create_device(&client, type_id).await;

    // Re-submitting a device's own serial is not a conflict
    let response = client
        .put(format!("{}/devices/{}", BASE_URL, first_id))
        .json(&json!({ "serial_number": first_serial }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Taking another device's serial is
    let response = client
        .put(format!("{}/devices/{}", BASE_URL, second_id))
        .json(&json!({ "serial_number": first_serial }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_assign_unavailable_device_rejected() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;

    // Already checked out
    let (checked_out_id, _) = create_device(&client, type_id).await;
    create_assignment(&client, checked_out_id, user_id).await;

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({ "device_id": checked_out_id, "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Retired
    let (retired_id, _) = create_device(&client, type_id).await;
    let response = client
        .put(format!("{}/devices/{}/retire", BASE_URL, retired_id))
        .send()
        .await
        .expect("Failed to retire device");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({ "device_id": retired_id, "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Unknown device is a 404, not a conflict
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({ "device_id": 0, "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_assign_to_inactive_user_rejected() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let inactive_user = create_user(&client, false).await;
    let (device_id, _) = create_device(&client, type_id).await;

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({ "device_id": device_id, "user_id": inactive_user }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore]
async fn test_double_return_rejected() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;
    let (device_id, _) = create_device(&client, type_id).await;
    let assignment = create_assignment(&client, device_id, user_id).await;
    let assignment_id = assignment["assignment_id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/assignments/{}/return", BASE_URL, assignment_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return device");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/assignments/{}/return", BASE_URL, assignment_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_return_notes_are_appended() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;
    let (device_id, _) = create_device(&client, type_id).await;

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .json(&json!({
            "device_id": device_id,
            "user_id": user_id,
            "notes": "scratched lid"
        }))
        .send()
        .await
        .expect("Failed to create assignment");
    let assignment: Value = response.json().await.expect("Failed to parse response");
    let assignment_id = assignment["assignment_id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/assignments/{}/return", BASE_URL, assignment_id))
        .json(&json!({ "notes": "charger missing" }))
        .send()
        .await
        .expect("Failed to return device");
    let returned: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(
        returned["notes"],
        "scratched lid\n\nReturn Notes: charger missing"
    );
}

#[tokio::test]
#[ignore]
async fn test_retire_lifecycle() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;

    // Retiring a checked-out device is rejected
    let (busy_id, _) = create_device(&client, type_id).await;
    create_assignment(&client, busy_id, user_id).await;

    let response = client
        .put(format!("{}/devices/{}/retire", BASE_URL, busy_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Retiring an available device succeeds and is idempotent
    let (free_id, _) = create_device(&client, type_id).await;

    let response = client
        .put(format!("{}/devices/{}/retire", BASE_URL, free_id))
        .send()
        .await
        .expect("Failed to retire device");
    assert!(response.status().is_success());
    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["is_retired"], true);

    let response = client
        .put(format!("{}/devices/{}/retire", BASE_URL, free_id))
        .send()
        .await
        .expect("Failed to retire device again");
    assert!(response.status().is_success());
    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["is_retired"], true);
}

#[tokio::test]
#[ignore]
async fn test_expiring_warranties_window() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let serial = unique("SN-warranty");
    let expiration = chrono_date_in_days(45);

    let response = client
        .post(format!("{}/devices", BASE_URL))
        .json(&json!({
            "device_type_id": type_id,
            "serial_number": serial,
            "warranty_expiration": expiration
        }))
        .send()
        .await
        .expect("Failed to create device");
    let device: Value = response.json().await.expect("Failed to parse response");
    let device_id = device["device_id"].as_i64().unwrap();

    // 30-day window excludes a warranty expiring in 45 days
    let report: Value = client
        .get(format!("{}/reports/expiring-warranties?days=30", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!report_contains_device(&report, device_id));

    // 90-day window includes it
    let report: Value = client
        .get(format!("{}/reports/expiring-warranties?days=90", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(report_contains_device(&report, device_id));
}

fn chrono_date_in_days(days: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn report_contains_device(report: &Value, device_id: i64) -> bool {
    report
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .any(|entry| entry["device_id"].as_i64() == Some(device_id))
        })
        .unwrap_or(false)
}

#[tokio::test]
#[ignore]
async fn test_device_status_report_buckets() {
    let client = Client::new();

    let report: Value = client
        .get(format!("{}/reports/device-status", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse response");

    let entries = report.as_array().expect("Report is not an array");
    let statuses: Vec<&str> = entries
        .iter()
        .filter_map(|entry| entry["status"].as_str())
        .collect();
    assert_eq!(statuses, vec!["Available", "Checked Out", "Retired"]);
}

#[tokio::test]
#[ignore]
async fn test_explicit_null_clears_field() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let serial = unique("SN-notes");

    let response = client
        .post(format!("{}/devices", BASE_URL))
        .json(&json!({
            "device_type_id": type_id,
            "serial_number": serial,
            "notes": "needs imaging"
        }))
        .send()
        .await
        .expect("Failed to create device");
    let device: Value = response.json().await.expect("Failed to parse response");
    let device_id = device["device_id"].as_i64().unwrap();

    // Omitting notes leaves them untouched
    let response = client
        .put(format!("{}/devices/{}", BASE_URL, device_id))
        .json(&json!({ "device_name": "imaging-bench" }))
        .send()
        .await
        .expect("Failed to update device");
    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["notes"], "needs imaging");

    // An explicit null clears them
    let response = client
        .put(format!("{}/devices/{}", BASE_URL, device_id))
        .json(&json!({ "notes": null }))
        .send()
        .await
        .expect("Failed to update device");
    let device: Value = response.json().await.expect("Failed to parse response");
    assert!(device["notes"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_unknown_device_is_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/devices/0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore]
async fn test_user_assignments_report() {
    let client = Client::new();

    let type_id = create_device_type(&client).await;
    let user_id = create_user(&client, true).await;
    let (first_device, _) = create_device(&client, type_id).await;
    let (second_device, _) = create_device(&client, type_id).await;
    create_assignment(&client, first_device, user_id).await;
    create_assignment(&client, second_device, user_id).await;

    let report: Value = client
        .get(format!("{}/reports/user-assignments?limit=1000", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse response");

    let entries = report.as_array().expect("Report is not an array");
    let entry = entries
        .iter()
        .find(|entry| entry["user_id"].as_i64() == Some(user_id))
        .expect("User missing from report");
    assert_eq!(entry["count"].as_i64(), Some(2));
    assert_eq!(entry["name"], "Jane Doe");
}
