//! Integration tests for the HTTP API.
//!
//! These drive the real router over an in-memory database and check the
//! status codes, headers and JSON shapes clients depend on.

mod common;

use axum::http::{StatusCode, header};
use chrono::Duration;
use dialer_core::utils::timestamp::parse_datetime;
use serde_json::{Value, json};

use common::TestApp;

fn example_campaign() -> Value {
    json!({
        "name": "mylittlecampaign",
        "description": "",
        "callerid": "1239876",
        "startingdate": "1301392136.0",
        "expirationdate": "1301932136.0",
        "frequency": "20",
        "callmaxduration": "50",
        "maxretry": "3",
        "intervalretry": "3000",
        "calltimeout": "45",
        "aleg_gateway": "1",
        "voipapp": "1",
        "extra_data": "2000"
    })
}

async fn create_campaign(app: &TestApp, name: &str) -> i64 {
    let reply = app
        .post("/api/v1/campaign/", "alice", json!({ "name": name }))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = TestApp::new().await;
    let reply = app
        .request(axum::http::Method::GET, "/health", None, None)
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "OK");
}

#[tokio::test]
async fn create_campaign_returns_created_record() {
    let app = TestApp::new().await;
    let reply = app
        .post("/api/v1/campaign/", "alice", example_campaign())
        .await;

    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let id = reply.body["id"].as_i64().unwrap();
    assert_eq!(
        reply.headers.get(header::LOCATION).unwrap(),
        format!("/api/v1/campaign/{id}/").as_str()
    );

    let body = &reply.body;
    assert_eq!(body["campaign_code"].as_str().unwrap().len(), 5);
    assert_eq!(body["startingdate"], "2011-03-29 09:48:56");
    assert_eq!(body["frequency"], 20);
    assert_eq!(body["intervalretry"], 3000);
    assert_eq!(body["daily_start_time"], "00:00:00");
    assert_eq!(body["aleg_gateway"]["name"], "default");
    assert_eq!(body["voipapp"]["resource_uri"], "/api/v1/voipapp/1/");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["resource_uri"], format!("/api/v1/campaign/{id}/"));
}

#[tokio::test]
async fn undecodable_requests_use_the_error_body() {
    let app = TestApp::new().await;

    let reply = app.get("/api/v1/campaign/?status=abc", "alice").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], 400);
    assert!(reply.body["error"].as_str().unwrap().starts_with("Bad request"));

    let reply = app
        .post_raw("/api/v1/campaign/", "alice", r#"{"name": "broken""#)
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], 400);

    let reply = app
        .post("/api/v1/phonebook/", "alice", json!({ "name": ["not", "a", "string"] }))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], 400);

    let reply = app.get("/api/v1/campaign/first/", "alice").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], 400);

    let list = app.get("/api/v1/campaign/", "alice").await;
    assert_eq!(list.body["meta"]["total_count"], 0);
}

#[tokio::test]
async fn missing_dates_default_to_a_week() {
    let app = TestApp::new().await;
    let id = create_campaign(&app, "defaults").await;

    let reply = app.get(&format!("/api/v1/campaign/{id}/"), "alice").await;
    assert_eq!(reply.status, StatusCode::OK);
    let start = parse_datetime(reply.body["startingdate"].as_str().unwrap()).unwrap();
    let end = parse_datetime(reply.body["expirationdate"].as_str().unwrap()).unwrap();
    assert_eq!(end - start, Duration::days(7));
}

#[tokio::test]
async fn pacing_over_limit_is_rejected_per_field() {
    let app = TestApp::new().await;
    let reply = app
        .post(
            "/api/v1/campaign/",
            "alice",
            json!({ "name": "fast", "frequency": 1000, "maxretry": 9, "calltimeout": 99 }),
        )
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["type"], "VALIDATION_FAILED");
    let metadata = &reply.body["metadata"];
    assert_eq!(metadata["chk_frequency"][0]["kind"], "limit_exceeded");
    assert!(metadata.get("chk_maxretry").is_some());
    assert!(metadata.get("chk_timeout").is_some());

    let list = app.get("/api/v1/campaign/", "alice").await;
    assert_eq!(list.body["meta"]["total_count"], 0);
}

#[tokio::test]
async fn unknown_references_are_rejected() {
    let app = TestApp::new().await;
    let reply = app
        .post(
            "/api/v1/campaign/",
            "alice",
            json!({ "name": "dangling", "aleg_gateway": 99, "voipapp": "/api/v1/voipapp/98/" }),
        )
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["metadata"].get("chk_gateway").is_some());
    assert!(reply.body["metadata"].get("chk_voipapp").is_some());
}

#[tokio::test]
async fn duplicate_name_is_rejected_for_same_owner() {
    let app = TestApp::new().await;
    create_campaign(&app, "twice").await;

    let reply = app
        .post("/api/v1/campaign/", "alice", json!({ "name": "twice" }))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["metadata"].get("chk_campaign_name").is_some());
}

#[tokio::test]
async fn list_filters_and_meta() {
    let app = TestApp::new().await;
    create_campaign(&app, "spring sale").await;
    create_campaign(&app, "summer sale").await;
    create_campaign(&app, "winter").await;

    let all = app.get("/api/v1/campaign/?limit=2", "alice").await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["meta"]["total_count"], 3);
    assert_eq!(all.body["meta"]["limit"], 2);
    assert_eq!(
        all.body["meta"]["next"],
        "/api/v1/campaign/?limit=2&offset=2"
    );
    assert!(all.body["meta"]["previous"].is_null());
    assert_eq!(all.body["objects"].as_array().unwrap().len(), 2);

    let exact = app.get("/api/v1/campaign/?name=winter", "alice").await;
    assert_eq!(exact.body["meta"]["total_count"], 1);

    let contains = app
        .get("/api/v1/campaign/?name__contains=sale", "alice")
        .await;
    assert_eq!(contains.body["meta"]["total_count"], 2);

    let paused = app.get("/api/v1/campaign/?status=2", "alice").await;
    assert_eq!(paused.body["meta"]["total_count"], 0);

    let bad = app.get("/api/v1/campaign/?status=9", "alice").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_return_no_content() {
    let app = TestApp::new().await;
    let id = create_campaign(&app, "editable").await;
    let uri = format!("/api/v1/campaign/{id}/");

    let reply = app
        .put(&uri, "alice", json!({ "description": "changed", "status": 2 }))
        .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let reply = app.get(&uri, "alice").await;
    assert_eq!(reply.body["description"], "changed");
    assert_eq!(reply.body["status"], 2);
    assert_eq!(reply.body["name"], "editable");

    assert_eq!(app.delete(&uri, "alice").await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, "alice").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_over_pacing_limit_leaves_campaign_unchanged() {
    let app = TestApp::new().await;
    let id = create_campaign(&app, "steady").await;
    let uri = format!("/api/v1/campaign/{id}/");

    let reply = app
        .put(&uri, "alice", json!({ "frequency": 1000, "description": "faster" }))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["type"], "VALIDATION_FAILED");
    assert_eq!(reply.body["metadata"]["chk_frequency"][0]["kind"], "limit_exceeded");

    let stored = app.get(&uri, "alice").await;
    assert_eq!(stored.body["frequency"], 10);
    assert_eq!(stored.body["description"], "");
}

#[tokio::test]
async fn delete_collection_removes_callers_campaigns() {
    let app = TestApp::new().await;
    create_campaign(&app, "one").await;
    create_campaign(&app, "two").await;

    let reply = app.delete("/api/v1/campaign/", "alice").await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let list = app.get("/api/v1/campaign/", "alice").await;
    assert_eq!(list.body["meta"]["total_count"], 0);
}

#[tokio::test]
async fn other_users_campaigns_are_hidden() {
    let app = TestApp::new().await;
    let bob = app.core.users().create("bob", common::PASSWORD, false).await.unwrap();
    app.core
        .users()
        .set_dialer_settings(bob.id, &dialer_core::DialerSettings::default())
        .await
        .unwrap();
    let id = create_campaign(&app, "private").await;
    let uri = format!("/api/v1/campaign/{id}/");

    assert_eq!(app.get(&uri, "bob").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri, "bob").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&uri, "admin").await.status, StatusCode::OK);

    // Same name for a different owner is fine.
    let reply = app
        .post("/api/v1/campaign/", "bob", json!({ "name": "private" }))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
}

#[tokio::test]
async fn dial_places_one_call_through_campaign_gateway() {
    let app = TestApp::new().await;
    let reply = app
        .post("/api/v1/campaign/", "alice", example_campaign())
        .await;
    let id = reply.body["id"].as_i64().unwrap();

    let reply = app
        .post(
            &format!("/api/v1/campaign/{id}/dial/"),
            "alice",
            json!({ "phone_number": "1000" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    assert_eq!(
        reply.body["RequestUUID"],
        "4f8ab6e6-96a3-11e0-8f2b-080027a5b0f3"
    );

    let calls = app.telephony.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].destination, "1000");
    assert_eq!(calls[0].caller_id, "1239876");
    assert_eq!(calls[0].gateway_string(), "user/,sofia/gateway/backup/");
    assert_eq!(calls[0].time_limit_secs, 50);
}

#[tokio::test]
async fn dial_without_gateway_is_bad_request() {
    let app = TestApp::new().await;
    let id = create_campaign(&app, "no gateway").await;

    let reply = app
        .post(
            &format!("/api/v1/campaign/{id}/dial/"),
            "alice",
            json!({ "phone_number": "1000" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(app.telephony.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn phonebook_links_campaign_and_nests_owner() {
    let app = TestApp::new().await;
    let campaign_id = create_campaign(&app, "with phonebook").await;

    let reply = app
        .post(
            "/api/v1/phonebook/",
            "alice",
            json!({
                "name": "mylittlephonebook",
                "description": "",
                "campaign_id": campaign_id.to_string(),
            }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(
        reply.body["campaign"],
        format!("/api/v1/campaign/{campaign_id}/")
    );
    assert_eq!(reply.body["user"]["username"], "alice");
    assert!(reply.headers.get(header::LOCATION).is_some());

    let list = app.get("/api/v1/phonebook/?name=mylittlephonebook", "alice").await;
    assert_eq!(list.body["meta"]["total_count"], 1);
    assert_eq!(list.body["objects"][0]["user"]["username"], "alice");

    let missing = app
        .post(
            "/api/v1/phonebook/",
            "alice",
            json!({ "name": "orphan", "campaign_id": 404 }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert!(missing.body["metadata"].get("chk_campaign").is_some());

    let ambiguous = app
        .post(
            "/api/v1/phonebook/",
            "alice",
            json!({ "name": "twice", "campaign_id": campaign_id, "campaign": campaign_id }),
        )
        .await;
    assert_eq!(ambiguous.status, StatusCode::BAD_REQUEST);
    assert_eq!(ambiguous.body["type"], "VALIDATION_FAILED");
    assert_eq!(ambiguous.body["metadata"]["chk_campaign"][0]["kind"], "invalid");
}

#[tokio::test]
async fn gateway_writes_need_superuser() {
    let app = TestApp::new().await;
    let body = json!({ "name": "carrier", "gateways": "sofia/gateway/carrier/" });

    let reply = app.post("/api/v1/gateway/", "alice", body.clone()).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = app.post("/api/v1/gateway/", "admin", body).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(reply.body["gateway_codecs"], "'PCMA,PCMU'");

    let list = app.get("/api/v1/gateway/", "alice").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["meta"]["total_count"], 2);
}

#[tokio::test]
async fn voipapp_crud_round() {
    let app = TestApp::new().await;
    let reply = app
        .post(
            "/api/v1/voipapp/",
            "admin",
            json!({ "name": "conference", "type": 3, "data": "room-1" }),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let uri = reply.body["resource_uri"].as_str().unwrap().to_string();

    let reply = app.put(&uri, "admin", json!({ "data": "room-2" })).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, "alice").await.body["data"], "room-2");

    assert_eq!(app.delete(&uri, "alice").await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.delete(&uri, "admin").await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn user_resource_is_read_only_and_scoped() {
    let app = TestApp::new().await;

    let own = app.get("/api/v1/user/", "alice").await;
    assert_eq!(own.body["meta"]["total_count"], 1);
    assert_eq!(own.body["objects"][0]["username"], "alice");
    assert!(own.body["objects"][0].get("password_hash").is_none());

    let all = app.get("/api/v1/user/", "admin").await;
    assert_eq!(all.body["meta"]["total_count"], 2);
    let filtered = app.get("/api/v1/user/?username=alice", "admin").await;
    assert_eq!(filtered.body["meta"]["total_count"], 1);

    let other = format!("/api/v1/user/{}/", app.admin.id);
    assert_eq!(app.get(&other, "alice").await.status, StatusCode::NOT_FOUND);

    let reply = app
        .post("/api/v1/user/", "admin", json!({ "username": "mallory" }))
        .await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn mycampaign_and_rating_views() {
    let app = TestApp::new().await;
    let id = create_campaign(&app, "rated").await;

    let mine = app.get(&format!("/api/v1/mycampaign/{id}/"), "alice").await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["rating"], 5.0);
    assert_eq!(mine.body["user"], format!("/api/v1/user/{}/", app.alice.id));
    assert!(mine.body["request_ip"].is_null());

    let ratings = app.get("/api/v1/rating/", "alice").await;
    assert_eq!(ratings.body["meta"]["total_count"], 1);
    assert_eq!(ratings.body["objects"][0]["rating"], 5.0);
    assert!(ratings.body["objects"][0].get("user").is_none());
}
