#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use events::{EventsConfig, EventsModule};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let cfg: EventsConfig = serde_json::from_value(json!({
        "events": [
            {"id": "wedding123", "name": "Wedding", "date": "2025-06-01",
             "location": "Venue A", "rsvp_form": "weddingrsvp"}
        ],
        "guests": {
            "wedding123": [
                {"id": "1", "name": "Jane Doe", "email": "jane@example.com",
                 "attending": "yes", "dietary": "Vegetarian", "needs": "Wheelchair access"},
                {"id": "2", "name": "John Smith", "attending": "no"}
            ],
            "birthday789": [
                {"id": "3", "name": "Alice Johnson", "attending": "yes"}
            ]
        }
    }))
    .unwrap();

    EventsModule::from_config(&cfg)
        .unwrap()
        .register_rest(Router::new())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn lists_events() {
    let (status, json) = get_json("/api/events").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["id"], "wedding123");
    assert_eq!(json[0]["rsvpForm"], "weddingrsvp");
}

#[tokio::test]
async fn lists_only_attending_guests() {
    let (status, json) = get_json("/api/events/wedding123").await;

    assert_eq!(status, StatusCode::OK);
    let guests = json.as_array().unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["name"], "Jane Doe");
    assert_eq!(guests[0]["attending"], "yes");
    assert_eq!(guests[0]["phone"], "");
}

#[tokio::test]
async fn guest_list_without_catalogue_entry_is_served() {
    let (_, json) = get_json("/api/events/birthday789").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_event_is_empty_list() {
    let (status, json) = get_json("/api/events/nope").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}
