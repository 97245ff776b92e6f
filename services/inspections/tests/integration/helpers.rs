use axum_test::TestServer;
use serde_json::{Value, json};

use leakwatch_inspections::infra::StoreBackend;
use leakwatch_inspections::infra::memory::MemoryStore;
use leakwatch_inspections::infra::password::Pbkdf2Hasher;
use leakwatch_inspections::router::build_router;
use leakwatch_inspections::state::AppState;

pub const PUBLIC_URL: &str = "http://inspections.test";

/// Router over an empty memory store, with a single PBKDF2 round.
pub fn test_server() -> TestServer {
    let state = AppState {
        store: StoreBackend::Memory(MemoryStore::new()),
        hasher: Pbkdf2Hasher::new(1),
        public_url: PUBLIC_URL.to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

pub fn campaign_body(society: &str) -> Value {
    json!({
        "societyName": society,
        "location": "Lyon",
        "kwhPrice": 0.15,
        "nbrCompressorUseByYear": 4,
        "electricityPrice": 1200.5,
        "description": "Annual survey",
    })
}

pub fn leak_body(campaign_id: i64) -> Value {
    json!({
        "leakLocation": "Compressor room",
        "leakImageBig": "big.jpg",
        "leakImageSmall": "small.jpg",
        "leakNumber": 1,
        "measuredFlow": 12.5,
        "campaignId": campaign_id,
    })
}

pub fn user_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "s3cret",
        "firstName": "Ada",
        "lastName": "Lovelace",
    })
}

/// POST `body` and return the created id.
pub async fn create(server: &TestServer, path: &str, body: &Value) -> i64 {
    let response = server.post(path).json(body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// `(propertyPath, message)` pairs of a validation error body.
pub fn violations(body: &Value) -> Vec<(String, String)> {
    body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| {
            (
                v["propertyPath"].as_str().unwrap().to_owned(),
                v["message"].as_str().unwrap().to_owned(),
            )
        })
        .collect()
}
