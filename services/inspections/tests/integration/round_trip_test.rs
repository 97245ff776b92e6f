use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::helpers::{PUBLIC_URL, campaign_body, create, leak_body, test_server, user_body};

/// POST `body`, then GET the `Location`; both documents must agree.
async fn create_and_fetch(server: &TestServer, path: &str, body: &Value) -> Value {
    let response = server.post(path).json(body).await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("{PUBLIC_URL}{path}/{id}")
    );

    let fetched = server.get(&format!("{path}/{id}")).await;
    fetched.assert_status(StatusCode::OK);
    let fetched = fetched.json::<Value>();
    assert_eq!(fetched, created);
    fetched
}

fn keys(doc: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn assert_fresh_timestamps(doc: &Value) {
    let created_at = doc["createdAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok(), "{created_at}");
    assert_eq!(doc["updatedAt"], Value::Null);
}

#[tokio::test]
async fn should_round_trip_campaign() {
    let server = test_server();
    let doc = create_and_fetch(&server, "/api/campaigns", &campaign_body("Acme")).await;

    assert_eq!(
        keys(&doc),
        vec![
            "createdAt",
            "description",
            "electricityPrice",
            "id",
            "isActive",
            "kwhPrice",
            "leaks",
            "location",
            "nbrCompressorUseByYear",
            "societyName",
            "updatedAt",
            "user",
        ]
    );
    assert_eq!(doc["id"], 1);
    assert_eq!(doc["societyName"], "Acme");
    assert_eq!(doc["location"], "Lyon");
    assert_eq!(doc["kwhPrice"], 0.15);
    assert_eq!(doc["nbrCompressorUseByYear"], 4);
    assert_eq!(doc["electricityPrice"], 1200.5);
    assert_eq!(doc["description"], "Annual survey");
    assert_eq!(doc["isActive"], false);
    assert_eq!(doc["user"], Value::Null);
    assert_eq!(doc["leaks"], json!([]));
    assert_fresh_timestamps(&doc);
}

#[tokio::test]
async fn should_round_trip_leak() {
    let server = test_server();
    let campaign_id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;
    let status_id = create(&server, "/api/status", &json!({ "statusName": "Open" })).await;
    let severity_id = create(&server, "/api/severities", &json!({ "severityName": "High" })).await;
    let mut body = leak_body(campaign_id);
    body["leakDescription"] = json!("Hissing valve");
    body["comment"] = json!("Fix next visit");
    body["statusId"] = json!(status_id);
    body["severityId"] = json!(severity_id);

    let doc = create_and_fetch(&server, "/api/leaks", &body).await;

    assert_eq!(
        keys(&doc),
        vec![
            "comment",
            "createdAt",
            "id",
            "leakDescription",
            "leakImageBig",
            "leakImageSmall",
            "leakLocation",
            "leakNumber",
            "lmStatus",
            "measuredFlow",
            "severity",
            "updatedAt",
        ]
    );
    assert_eq!(doc["leakLocation"], "Compressor room");
    assert_eq!(doc["leakDescription"], "Hissing valve");
    assert_eq!(doc["leakImageBig"], "big.jpg");
    assert_eq!(doc["leakImageSmall"], "small.jpg");
    assert_eq!(doc["leakNumber"], 1);
    assert_eq!(doc["measuredFlow"], 12.5);
    assert_eq!(doc["comment"], "Fix next visit");
    assert_eq!(doc["lmStatus"], json!({ "id": status_id, "statusName": "Open" }));
    assert_eq!(doc["severity"], json!({ "severityName": "High" }));
    assert_fresh_timestamps(&doc);
}

#[tokio::test]
async fn should_round_trip_gaz() {
    let server = test_server();
    let doc = create_and_fetch(&server, "/api/gaz", &json!({ "gazName": "Nitrogen" })).await;

    assert_eq!(keys(&doc), vec!["createdAt", "gazName", "id", "updatedAt"]);
    assert_eq!(doc["id"], 1);
    assert_eq!(doc["gazName"], "Nitrogen");
    assert_fresh_timestamps(&doc);
}

#[tokio::test]
async fn should_round_trip_severity() {
    let server = test_server();
    let doc =
        create_and_fetch(&server, "/api/severities", &json!({ "severityName": "Critical" })).await;

    assert_eq!(keys(&doc), vec!["createdAt", "id", "severityName", "updatedAt"]);
    assert_eq!(doc["id"], 1);
    assert_eq!(doc["severityName"], "Critical");
    assert_fresh_timestamps(&doc);
}

#[tokio::test]
async fn should_round_trip_leak_status() {
    let server = test_server();
    let doc = create_and_fetch(&server, "/api/status", &json!({ "statusName": "Repaired" })).await;

    assert_eq!(keys(&doc), vec!["createdAt", "id", "statusName", "updatedAt"]);
    assert_eq!(doc["id"], 1);
    assert_eq!(doc["statusName"], "Repaired");
    assert_fresh_timestamps(&doc);
}

#[tokio::test]
async fn should_round_trip_user() {
    let server = test_server();
    let agency_id = create(&server, "/api/agencies", &json!({ "name": "North" })).await;
    let mut body = user_body("ada@example.com");
    body["phoneNumber"] = json!("0102030405");
    body["agencyId"] = json!(agency_id);

    let doc = create_and_fetch(&server, "/api/users", &body).await;

    assert_eq!(
        keys(&doc),
        vec![
            "agency",
            "createdAt",
            "email",
            "firstName",
            "id",
            "lastName",
            "phoneNumber",
            "roles",
            "updatedAt",
        ]
    );
    assert_eq!(doc["email"], "ada@example.com");
    assert_eq!(doc["firstName"], "Ada");
    assert_eq!(doc["lastName"], "Lovelace");
    assert_eq!(doc["phoneNumber"], "0102030405");
    assert_eq!(doc["roles"], json!(["ROLE_USER"]));
    assert_eq!(doc["agency"], json!({ "id": agency_id, "name": "North" }));
    assert_fresh_timestamps(&doc);
}
