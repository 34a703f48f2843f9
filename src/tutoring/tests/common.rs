use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::tutoring::domain::{
    Course, CourseDraft, Institution, InstitutionDraft, Person, PersonDraft, Request,
    RequestDraft, SchoolLevel,
};
use crate::tutoring::router::tutoring_router;
use crate::tutoring::service::TutoringService;
use crate::tutoring::store::MemoryStore;

pub(super) fn build_service() -> (TutoringService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (TutoringService::new(store.clone()), store)
}

pub(super) fn person_draft(name: &str, email: &str) -> PersonDraft {
    PersonDraft {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some("password".to_string()),
    }
}

pub(super) fn session_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 22).expect("valid date")
}

pub(super) fn session_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 1).expect("valid time")
}

pub(super) struct MatchFixture {
    pub(super) institution: Institution,
    pub(super) course: Course,
    pub(super) tutor: Person,
    pub(super) student: Person,
}

pub(super) fn seed_match(service: &TutoringService<MemoryStore>) -> MatchFixture {
    let institution = service
        .create_institution(InstitutionDraft {
            name: Some("McGill University".to_string()),
            level: Some(SchoolLevel::University),
        })
        .expect("institution stored");
    let course = service
        .create_course(CourseDraft {
            name: Some("MATH 263".to_string()),
            subject: Some("Mathematics".to_string()),
            institution: Some(institution.id),
        })
        .expect("course stored");
    let tutor = service
        .create_tutor(person_draft("Martin", "martin@mail.example.ca"))
        .expect("tutor stored");
    let student = service
        .create_student(person_draft("Jason", "jason@mail.example.ca"))
        .expect("student stored");

    MatchFixture {
        institution,
        course,
        tutor,
        student,
    }
}

pub(super) fn request_draft(fixture: &MatchFixture) -> RequestDraft {
    RequestDraft {
        time: Some(session_time()),
        date: Some(session_date()),
        tutor: Some(fixture.tutor.id),
        student: Some(fixture.student.id),
        course: Some(fixture.course.id),
    }
}

pub(super) fn seed_request(
    service: &TutoringService<MemoryStore>,
    fixture: &MatchFixture,
) -> Request {
    service
        .create_request(request_draft(fixture))
        .expect("request stored")
}

pub(super) fn build_router() -> (axum::Router, Arc<TutoringService<MemoryStore>>) {
    let (service, _) = build_service();
    let service = Arc::new(service);
    (tutoring_router(service.clone()), service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
