use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{
    PUBLIC_URL, campaign_body, create, leak_body, test_server, user_body, violations,
};

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    server.get("/healthz").await.assert_status(StatusCode::OK);
    server.get("/readyz").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let server = test_server();
    let response = server.get("/api/agencies").await;
    let request_id = response.header("x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn should_create_agency_and_read_it_back() {
    let server = test_server();

    let response = server
        .post("/api/agencies")
        .json(&json!({ "name": "North Agency" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("{PUBLIC_URL}/api/agencies/1")
    );
    let created = response.json::<Value>();
    assert_eq!(created["name"], "North Agency");
    assert_eq!(created["users"], json!([]));
    assert_eq!(created["_links"]["self"]["href"], "/api/agencies/1");

    let fetched = server.get("/api/agencies/1").await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.json::<Value>(), created);

    let listed = server.get("/api/agencies").await.json::<Value>();
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn should_reject_blank_agency_name_with_one_violation() {
    let server = test_server();

    let response = server
        .post("/api/agencies")
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert_eq!(
        violations(&body),
        vec![(
            "name".to_owned(),
            "Agency name cannot be blank or null".to_owned()
        )]
    );

    let listed = server.get("/api/agencies").await.json::<Value>();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn should_reject_negative_kwh_price() {
    let server = test_server();
    let mut body = campaign_body("Acme");
    body["kwhPrice"] = json!(-5);

    let response = server.post("/api/campaigns").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&response.json::<Value>()),
        vec![(
            "kwhPrice".to_owned(),
            "The KWH price should be positive".to_owned()
        )]
    );
}

#[tokio::test]
async fn should_enforce_unique_email_but_not_unique_agency_name() {
    let server = test_server();

    create(&server, "/api/users", &user_body("ada@example.com")).await;
    let response = server
        .post("/api/users")
        .json(&user_body("ada@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&response.json::<Value>()),
        vec![("email".to_owned(), "this email is already used".to_owned())]
    );

    create(&server, "/api/agencies", &json!({ "name": "North" })).await;
    create(&server, "/api/agencies", &json!({ "name": "North" })).await;
    let listed = server.get("/api/agencies").await.json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_never_expose_password_and_always_grant_default_role() {
    let server = test_server();
    let agency_id = create(&server, "/api/agencies", &json!({ "name": "North" })).await;
    let mut body = user_body("ada@example.com");
    body["agencyId"] = json!(agency_id);
    body["roles"] = json!(["ROLE_ADMIN"]);
    let id = create(&server, "/api/users", &body).await;

    let user = server
        .get(&format!("/api/users/{id}"))
        .await
        .json::<Value>();
    assert!(user.get("password").is_none());
    assert_eq!(user["roles"], json!(["ROLE_ADMIN", "ROLE_USER"]));
    assert_eq!(user["agency"], json!({ "id": agency_id, "name": "North" }));

    let agency = server
        .get(&format!("/api/agencies/{agency_id}"))
        .await
        .json::<Value>();
    let members = agency["users"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "ada@example.com");
    assert!(members[0].get("password").is_none());
}

#[tokio::test]
async fn should_reject_malformed_email_and_roles() {
    let server = test_server();
    let mut body = user_body("not-an-email");
    body["roles"] = json!({ "admin": true });

    let response = server.post("/api/users").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&response.json::<Value>()),
        vec![
            (
                "email".to_owned(),
                "The email \"not-an-email\" is not a valid email.".to_owned()
            ),
            ("roles".to_owned(), "You've entered an invalid Json.".to_owned()),
        ]
    );
}

#[tokio::test]
async fn should_leave_unresolved_user_reference_null() {
    let server = test_server();

    let id = create(
        &server,
        "/api/gaz",
        &json!({ "gazName": "Nitrogen", "userId": 999 }),
    )
    .await;
    let gaz = server.get(&format!("/api/gaz/{id}")).await.json::<Value>();
    assert_eq!(gaz["gazName"], "Nitrogen");

    let mut body = campaign_body("Acme");
    body["userId"] = json!("not-a-number");
    let id = create(&server, "/api/campaigns", &body).await;
    let campaign = server
        .get(&format!("/api/campaigns/{id}"))
        .await
        .json::<Value>();
    assert_eq!(campaign["user"], Value::Null);
}

#[tokio::test]
async fn should_update_present_fields_and_keep_absent_ones() {
    let server = test_server();
    let id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;

    server
        .put(&format!("/api/campaigns/{id}"))
        .json(&json!({ "location": "Paris", "description": null }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let campaign = server
        .get(&format!("/api/campaigns/{id}"))
        .await
        .json::<Value>();
    assert_eq!(campaign["societyName"], "Acme");
    assert_eq!(campaign["location"], "Paris");
    assert_eq!(campaign["description"], Value::Null);
    assert!(campaign["updatedAt"].is_string());
}

#[tokio::test]
async fn should_reject_invalid_update_without_persisting() {
    let server = test_server();
    let id = create(&server, "/api/severities", &json!({ "severityName": "High" })).await;

    let response = server
        .put(&format!("/api/severities/{id}"))
        .json(&json!({ "severityName": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let severity = server
        .get(&format!("/api/severities/{id}"))
        .await
        .json::<Value>();
    assert_eq!(severity["severityName"], "High");
}

#[tokio::test]
async fn should_return_not_found_for_missing_rows() {
    let server = test_server();

    let response = server.get("/api/status/42").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "NOT_FOUND");
    assert_eq!(body["message"], "leak status not found");

    server
        .put("/api/leaks/42")
        .json(&json!({ "leakNumber": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/api/users/42")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_row_and_unset_references_to_it() {
    let server = test_server();
    let status_id = create(&server, "/api/status", &json!({ "statusName": "Open" })).await;
    let campaign_id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;
    let mut body = leak_body(campaign_id);
    body["statusId"] = json!(status_id);
    let leak_id = create(&server, "/api/leaks", &body).await;

    let leak = server
        .get(&format!("/api/leaks/{leak_id}"))
        .await
        .json::<Value>();
    assert_eq!(leak["lmStatus"], json!({ "id": status_id, "statusName": "Open" }));

    server
        .delete(&format!("/api/status/{status_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/status/{status_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let leak = server
        .get(&format!("/api/leaks/{leak_id}"))
        .await
        .json::<Value>();
    assert_eq!(leak["lmStatus"], Value::Null);
}

#[tokio::test]
async fn should_require_leak_images() {
    let server = test_server();
    let campaign_id = create(&server, "/api/campaigns", &campaign_body("Acme")).await;
    let mut body = leak_body(campaign_id);
    body["leakImageSmall"] = Value::Null;

    let response = server.post("/api/leaks").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&response.json::<Value>()),
        vec![(
            "leakImageSmall".to_owned(),
            "The small leak image cannot be blank or null".to_owned()
        )]
    );
}
