use super::common::*;
use crate::tutoring::domain::{RoomDraft, TimeSlotDraft, WageDraft};
use crate::tutoring::views::{self, RequestView, TutorProfileView, ViewError};

#[test]
fn absent_sources_fail_with_the_entity_name() {
    assert_eq!(
        views::person_view(None).expect_err("absent person"),
        ViewError("Person")
    );
    assert_eq!(
        views::person_view(None).expect_err("absent person").to_string(),
        "There is no such Person!"
    );
    assert_eq!(
        views::institution_view(None).expect_err("absent institution").to_string(),
        "There is no such Institution!"
    );
    assert_eq!(
        views::course_view(None, None).expect_err("absent course").to_string(),
        "There is no such Course!"
    );
    assert_eq!(
        views::room_view(None).expect_err("absent room").to_string(),
        "There is no such Room!"
    );
    assert_eq!(
        views::notification_view(None)
            .expect_err("absent notification")
            .to_string(),
        "There is no such Notification!"
    );
    assert_eq!(
        views::application_view(None)
            .expect_err("absent application")
            .to_string(),
        "There is no such Application!"
    );
    assert_eq!(
        views::request_view(None).expect_err("absent request").to_string(),
        "There is no such Request!"
    );
    assert_eq!(
        views::tutor_profile_view(None)
            .expect_err("absent tutor")
            .to_string(),
        "There is no such Tutor!"
    );
}

#[test]
fn a_course_with_a_missing_institution_does_not_map_partially() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);

    let error = views::course_view(Some(&fixture.course), None).expect_err("missing institution");
    assert_eq!(error.to_string(), "There is no such Institution!");
}

#[test]
fn review_mapping_fails_on_the_first_missing_person() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);
    let review = service
        .create_review(crate::tutoring::domain::ReviewDraft {
            rating: Some(5),
            comment: Some("This is a comment.".to_string()),
            author: Some(fixture.student.id),
            recipient: Some(fixture.tutor.id),
        })
        .expect("review stored");

    let error =
        views::review_view(Some(&review), None, Some(&fixture.tutor)).expect_err("missing author");
    assert_eq!(error.to_string(), "There is no such Person!");
}

#[test]
fn request_view_round_trips_through_json() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);
    let request = seed_request(&service, &fixture);
    let room = service
        .create_room(RoomDraft {
            number: Some(12),
            capacity: Some(30),
        })
        .expect("room stored");
    service.assign_room(request.id, room.id).expect("assigned");
    service.accept_request(request.id).expect("accepted");

    let detail = service
        .request_detail(request.id)
        .expect("detail")
        .expect("present");
    let view = views::request_view(Some(&detail)).expect("mapped");

    assert_eq!(view.id, request.id);
    assert_eq!(view.date, session_date());
    assert_eq!(view.time, session_time());
    assert_eq!(view.tutor.email, fixture.tutor.email);
    assert_eq!(view.student.password, fixture.student.password);
    assert_eq!(view.course.name, fixture.course.name);
    assert_eq!(view.course.institution.name, fixture.institution.name);
    assert_eq!(view.room.as_ref().map(|room| room.number), Some(12));
    assert_eq!(
        view.notification.as_ref().map(|n| n.request),
        Some(request.id)
    );

    let encoded = serde_json::to_string(&view).expect("serialize");
    let decoded: RequestView = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, view);
}

#[test]
fn request_view_refuses_a_dangling_room_reference() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);
    let request = seed_request(&service, &fixture);
    let room = service
        .create_room(RoomDraft {
            number: Some(12),
            capacity: Some(30),
        })
        .expect("room stored");
    service.assign_room(request.id, room.id).expect("assigned");

    let mut detail = service
        .request_detail(request.id)
        .expect("detail")
        .expect("present");
    detail.room = None;

    let error = views::request_view(Some(&detail)).expect_err("dangling room");
    assert_eq!(error.to_string(), "There is no such Room!");
}

#[test]
fn tutor_profile_view_preserves_collection_cardinality() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);
    seed_request(&service, &fixture);
    let accepted = seed_request(&service, &fixture);
    service.accept_request(accepted.id).expect("accepted");

    for rate in [18, 22] {
        service
            .create_wage(WageDraft {
                tutor: Some(fixture.tutor.id),
                course: Some(fixture.course.id),
                hourly_rate: Some(rate),
            })
            .expect("wage stored");
    }
    service
        .create_time_slot(TimeSlotDraft {
            tutor: Some(fixture.tutor.id),
            date: Some(session_date()),
            time: Some(session_time()),
        })
        .expect("slot stored");

    let profile = service
        .tutor_profile(&fixture.tutor.email)
        .expect("profile")
        .expect("present");
    let view = views::tutor_profile_view(Some(&profile)).expect("mapped");

    assert_eq!(view.time_slots.len(), profile.time_slots.len());
    assert_eq!(view.wages.len(), profile.wages.len());
    assert_eq!(view.requests.len(), profile.requests.len());

    let accepted_count = view
        .requests
        .iter()
        .filter(|request| request.status.label() == "accepted")
        .count();
    assert_eq!(accepted_count, 1);

    let encoded = serde_json::to_string(&view).expect("serialize");
    let decoded: TutorProfileView = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, view);
}

#[test]
fn scalar_fields_survive_the_wire_mapping() {
    let (service, _) = build_service();
    let fixture = seed_match(&service);

    let view = views::person_view(Some(&fixture.tutor)).expect("mapped");
    assert_eq!(view.id, fixture.tutor.id);
    assert_eq!(view.name, fixture.tutor.name);
    assert_eq!(view.email, fixture.tutor.email);
    assert_eq!(view.password, fixture.tutor.password);

    let view =
        views::course_view(Some(&fixture.course), Some(&fixture.institution)).expect("mapped");
    assert_eq!(view.subject, fixture.course.subject);
    assert_eq!(view.institution.level, fixture.institution.level);
}
