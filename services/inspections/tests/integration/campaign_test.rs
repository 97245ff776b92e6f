use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{campaign_body, create, leak_body, test_server};

#[tokio::test]
async fn should_paginate_campaigns_by_three() {
    let server = test_server();
    for n in 1..=15 {
        create(&server, "/api/campaigns", &campaign_body(&format!("Society {n}"))).await;
    }

    let page = server
        .get("/api/campaigns")
        .add_query_param("page", 2)
        .await;
    page.assert_status(StatusCode::OK);
    let names: Vec<Value> = page
        .json::<Vec<Value>>()
        .into_iter()
        .map(|c| c["societyName"].clone())
        .collect();
    assert_eq!(names, vec![json!("Society 4"), json!("Society 5"), json!("Society 6")]);

    let first = server.get("/api/campaigns").await.json::<Vec<Value>>();
    assert_eq!(first.len(), 3);
    assert_eq!(first[0]["id"], 1);

    let past_end = server
        .get("/api/campaigns")
        .add_query_param("page", 6)
        .await
        .json::<Vec<Value>>();
    assert!(past_end.is_empty());

    let wide = server
        .get("/api/campaigns")
        .add_query_param("page", 1)
        .add_query_param("limit", 20)
        .await
        .json::<Vec<Value>>();
    assert_eq!(wide.len(), 15);
}

#[tokio::test]
async fn should_answer_empty_page_for_huge_page_number() {
    let server = test_server();
    create(&server, "/api/campaigns", &campaign_body("Acme")).await;

    let response = server
        .get("/api/campaigns")
        .add_query_param("page", i64::MAX)
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn should_reject_page_below_one() {
    let server = test_server();
    let response = server
        .get("/api/campaigns")
        .add_query_param("page", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PAGE");
}

#[tokio::test]
async fn should_embed_leaks_in_campaign_view() {
    let server = test_server();
    let campaign_id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;
    let severity_id = create(&server, "/api/severities", &json!({ "severityName": "High" })).await;
    let mut body = leak_body(campaign_id);
    body["severityId"] = json!(severity_id);
    create(&server, "/api/leaks", &body).await;

    let campaign = server
        .get(&format!("/api/campaigns/{campaign_id}"))
        .await
        .json::<Value>();
    assert_eq!(campaign["isActive"], false);
    let leaks = campaign["leaks"].as_array().unwrap();
    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0]["leakNumber"], 1);
    assert_eq!(leaks[0]["measuredFlow"], 12.5);
    assert_eq!(leaks[0]["severity"], json!({ "severityName": "High" }));
    assert_eq!(leaks[0]["lmStatus"], Value::Null);
    assert!(leaks[0].get("leakImageBig").is_none());
}

#[tokio::test]
async fn should_cascade_campaign_deletion_to_leaks() {
    let server = test_server();
    let doomed = create(&server, "/api/campaigns", &campaign_body("Acme")).await;
    let kept = create(&server, "/api/campaigns", &campaign_body("Globex")).await;
    let doomed_leaks = [
        create(&server, "/api/leaks", &leak_body(doomed)).await,
        create(&server, "/api/leaks", &leak_body(doomed)).await,
    ];
    let kept_leak = create(&server, "/api/leaks", &leak_body(kept)).await;

    server
        .delete(&format!("/api/campaigns/{doomed}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    for id in doomed_leaks {
        server
            .get(&format!("/api/leaks/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
    server
        .get(&format!("/api/leaks/{kept_leak}"))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_toggle_campaign_back_and_forth() {
    let server = test_server();
    let id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;

    let first = server.post(&format!("/api/campaigns/state/{id}")).await;
    first.assert_status(StatusCode::OK);
    assert_eq!(
        first.json::<Value>(),
        json!({ "code": 200, "message": "Campaign activated" })
    );

    let second = server
        .post(&format!("/api/campaigns/state/{id}"))
        .await
        .json::<Value>();
    assert_eq!(second["message"], "Campaign deactivated");

    let campaign = server
        .get(&format!("/api/campaigns/{id}"))
        .await
        .json::<Value>();
    assert_eq!(campaign["isActive"], false);
}

#[tokio::test]
async fn should_return_not_found_when_toggling_missing_campaign() {
    let server = test_server();
    let response = server.post("/api/campaigns/state/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "campaign not found");
}
