use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::tutoring::domain::RoomDraft;

fn post(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn posting_a_tutor_returns_the_stored_view() {
    let (router, _) = build_router();

    let response = router
        .clone()
        .oneshot(post(
            "/api/v1/tutors",
            json!({
                "name": "Martin",
                "email": "martin@mail.example.ca",
                "password": "password"
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("name"), Some(&json!("Martin")));
    assert_eq!(payload.get("email"), Some(&json!("martin@mail.example.ca")));
    assert!(payload.get("id").and_then(Value::as_u64).is_some());

    let response = router
        .oneshot(get("/api/v1/tutors"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let listing = read_json_body(response).await;
    assert_eq!(listing.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn invalid_drafts_surface_the_rule_message() {
    let (router, _) = build_router();

    let response = router
        .oneshot(post(
            "/api/v1/tutors",
            json!({ "password": "password" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Tutor name, email or password cannot be empty!"))
    );
}

#[tokio::test]
async fn unknown_tutor_lookup_is_a_404_with_the_entity_name() {
    let (router, _) = build_router();

    let response = router
        .oneshot(get("/api/v1/tutors/absent@mail.example.ca"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("error"), Some(&json!("There is no such Tutor!")));
}

#[tokio::test]
async fn course_creation_against_a_missing_institution_is_a_404() {
    let (router, _) = build_router();

    let response = router
        .oneshot(post(
            "/api/v1/courses",
            json!({ "name": "MATH 263", "subject": "Mathematics", "institution": 404 }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("There is no such Institution!"))
    );
}

#[tokio::test]
async fn the_acceptance_workflow_runs_over_http() {
    let (router, service) = build_router();
    let fixture = seed_match(&service);
    let request = seed_request(&service, &fixture);
    let room = service
        .create_room(RoomDraft {
            number: Some(12),
            capacity: Some(30),
        })
        .expect("room stored");

    let response = router
        .clone()
        .oneshot(post(
            &format!("/api/v1/requests/{}/room", request.id),
            json!({ "room": room.id }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/room/number").and_then(Value::as_u64),
        Some(12)
    );

    let response = router
        .clone()
        .oneshot(post(
            &format!("/api/v1/requests/{}/accept", request.id),
            json!({}),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("request").and_then(Value::as_u64),
        Some(u64::from(request.id.0))
    );

    // a second acceptance conflicts and leaves the attached notification alone
    let response = router
        .clone()
        .oneshot(post(
            &format!("/api/v1/requests/{}/accept", request.id),
            json!({}),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .oneshot(get(&format!("/api/v1/requests/{}", request.id)))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("accepted")));
    assert_eq!(
        payload.pointer("/tutor/email"),
        Some(&json!(fixture.tutor.email))
    );
}

#[tokio::test]
async fn time_slot_natural_key_lookup_parses_its_path() {
    let (router, service) = build_router();
    let fixture = seed_match(&service);
    service
        .create_time_slot(crate::tutoring::domain::TimeSlotDraft {
            tutor: Some(fixture.tutor.id),
            date: Some(session_date()),
            time: Some(session_time()),
        })
        .expect("slot stored");

    let response = router
        .clone()
        .oneshot(get("/api/v1/time-slots/2026-09-22/08:00:01"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));

    let response = router
        .oneshot(get("/api/v1/time-slots/not-a-date/08:00:01"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tutor_profile_endpoint_returns_the_flattened_graph() {
    let (router, service) = build_router();
    let fixture = seed_match(&service);
    let request = seed_request(&service, &fixture);
    service.accept_request(request.id).expect("accepted");

    let response = router
        .oneshot(get(&format!(
            "/api/v1/tutors/{}/profile",
            fixture.tutor.email
        )))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("email"), Some(&json!(fixture.tutor.email)));
    assert_eq!(
        payload.pointer("/requests/0/status"),
        Some(&json!("accepted"))
    );
}
