use axum::{body::Body, http::Request, http::StatusCode, Router};
use fleetbook_booking::routes::routes;
use fleetbook_booking::{BookingSession, BookingState, Fleet};
use fleetbook_common::StoreError;
use fleetbook_config::{ExpiryReference, GroupingPolicy};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use fixtures::{create_test_config, date, reservation, MemoryStore, PASSWORD};

async fn build_app(
    store: Arc<MemoryStore>,
    policy: GroupingPolicy,
    expiry: ExpiryReference,
) -> Router {
    let config = create_test_config(policy, expiry);
    let session = Arc::new(BookingSession::new(store));
    // Load errors are left in the session; reads report them.
    let _ = session.reload().await;
    routes(Arc::new(BookingState {
        fleet: Arc::new(Fleet::from_config(&config.fleet).expect("fixture fleet is valid")),
        config: Arc::new(config),
        session,
    }))
}

fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_rows(vec![
        reservation(0, "BJK-0596", date(2024, 3, 1), date(2024, 3, 3), "Lin"),
        reservation(1, "RBH-9726", date(2024, 3, 2), date(2024, 3, 2), "Chen"),
        reservation(2, "RFJ-2180", date(2024, 2, 20), date(2024, 2, 21), "Wu"),
    ]))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, password: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header("X-Booking-Password", password)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn group_ids(body: &Value) -> Vec<(String, Vec<String>)> {
    body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| {
            (
                g["date"].as_str().unwrap().to_string(),
                g["reservations"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|r| r["id"].as_str().unwrap().to_string())
                    .collect(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_bookings_expand_days_hides_days_before_selected_date() {
    let app = build_app(
        seeded_store(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;
    let (status, body) = get_json(&app, "/bookings?date=2024-03-02").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policy"], "expand_days");
    assert_eq!(
        group_ids(&body),
        vec![
            ("2024-03-02".to_string(), vec!["0".to_string(), "1".to_string()]),
            ("2024-03-03".to_string(), vec!["0".to_string()]),
        ]
    );
}

#[tokio::test]
async fn test_bookings_start_date_policy_keeps_running_reservation() {
    let app = build_app(
        seeded_store(),
        GroupingPolicy::StartDate,
        ExpiryReference::SelectedDate,
    )
    .await;
    let (_, body) = get_json(&app, "/bookings?date=2024-03-03").await;

    assert_eq!(
        group_ids(&body),
        vec![("2024-03-01".to_string(), vec!["0".to_string()])]
    );
}

#[tokio::test]
async fn test_bookings_query_overrides_policy_and_filter() {
    let app = build_app(
        seeded_store(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;
    let (_, body) = get_json(
        &app,
        "/bookings?date=2024-03-02&policy=start_date&hide_expired=false",
    )
    .await;

    assert_eq!(body["hidden_before"], Value::Null);
    let dates: Vec<String> = group_ids(&body).into_iter().map(|(d, _)| d).collect();
    assert_eq!(dates, vec!["2024-02-20", "2024-03-01", "2024-03-02"]);
}

#[tokio::test]
async fn test_availability_by_vehicle_and_region() {
    let app = build_app(
        seeded_store(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;
    let (status, body) = get_json(&app, "/availability?date=2024-03-02").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], json!(["BHB-7291", "RFJ-2180"]));
    let regions: Vec<(String, bool)> = body["regions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["region"].as_str().unwrap().to_string(),
                r["has_available"].as_bool().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        regions,
        vec![
            ("屏東".to_string(), true),
            ("高雄".to_string(), false),
            ("台東".to_string(), true)
        ]
    );
}

#[tokio::test]
async fn test_vehicles_lists_reference_data() {
    let app = build_app(
        seeded_store(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;
    let (_, body) = get_json(&app, "/vehicles").await;

    assert_eq!(body["vehicles"].as_array().unwrap().len(), 4);
    assert_eq!(body["vehicles"][0]["label"], "屏辦YARIS");
    assert_eq!(body["locations"], json!(["屏東辦", "高雄辦", "台東辦"]));
}

#[tokio::test]
async fn test_booking_flow_then_visible_in_availability() {
    let store = seeded_store();
    let app = build_app(
        store.clone(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/bookings",
        PASSWORD,
        json!({
            "start_date": "2024-03-04",
            "end_date": "2024-03-05",
            "resource_id": "BJK-0596",
            "requester": "Huang",
            "destination": "Pingtung",
            "note": "site visit"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["reservation"]["id"], "3");
    assert_eq!(body["reservation"]["location"], "屏東辦");

    let appended = store.appended.lock().unwrap().clone();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].note.as_deref(), Some("site visit"));

    let (_, body) = get_json(&app, "/availability?date=2024-03-05").await;
    assert_eq!(
        body["available"],
        json!(["BHB-7291", "RBH-9726", "RFJ-2180"])
    );
}

#[tokio::test]
async fn test_handover_day_booking_conflicts() {
    let store = seeded_store();
    let app = build_app(
        store.clone(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/bookings",
        PASSWORD,
        json!({
            "start_date": "2024-03-03",
            "end_date": "2024-03-04",
            "resource_id": "BJK-0596",
            "requester": "Huang",
            "destination": "Pingtung"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 409);
    assert!(store.appended.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_longer_than_limit_is_rejected() {
    let store = seeded_store();
    let app = build_app(
        store.clone(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/bookings",
        PASSWORD,
        json!({
            "start_date": "2024-04-01",
            "end_date": "2999-04-01",
            "resource_id": "RBH-9726",
            "requester": "Chen",
            "destination": "Tainan"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert!(store.appended.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_write_failure_is_bad_gateway_and_not_recorded() {
    let store = seeded_store();
    *store.write_error.lock().unwrap() = Some(StoreError::WriteFailed("quota".to_string()));
    let app = build_app(
        store.clone(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;

    let (status, _) = post_json(
        &app,
        "/bookings",
        PASSWORD,
        json!({
            "start_date": "2024-04-01",
            "end_date": "2024-04-01",
            "resource_id": "RBH-9726",
            "requester": "Chen",
            "destination": "Tainan"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = get_json(&app, "/bookings?date=2024-04-01").await;
    assert!(group_ids(&body).is_empty());
}

#[tokio::test]
async fn test_failed_load_then_refresh_recovers() {
    let store = seeded_store();
    *store.fetch_error.lock().unwrap() = Some(StoreError::FetchFailed("503".to_string()));
    let app = build_app(
        store.clone(),
        GroupingPolicy::ExpandDays,
        ExpiryReference::SelectedDate,
    )
    .await;

    let (status, body) = get_json(&app, "/availability?date=2024-03-02").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], 502);

    let (status, _) = post_json(&app, "/bookings/refresh", "", json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    *store.fetch_error.lock().unwrap() = None;
    let (status, body) = post_json(&app, "/bookings/refresh", "", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["reservations"], 3);

    let (status, _) = get_json(&app, "/availability?date=2024-03-02").await;
    assert_eq!(status, StatusCode::OK);
}
