//! JSON endpoints over the domain service.
//!
//! One route family per service operation. Validation failures come back as
//! 400 with the rule's message, absent entities as 404, duplicate acceptance
//! as 409; the store itself failing is a 500.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ApplicationDraft, CourseDraft, InstitutionDraft, NotificationDraft, Person, PersonDraft,
    RequestDraft, RequestId, ReviewDraft, RoomDraft, RoomId, TimeSlotDraft, WageDraft,
};
use super::repository::TutoringStore;
use super::service::{ServiceError, TutoringService};
use super::views::{self, ViewError};

pub fn tutoring_router<S: TutoringStore + 'static>(
    service: Arc<TutoringService<S>>,
) -> Router {
    Router::new()
        .route(
            "/api/v1/tutors",
            post(create_tutor::<S>).get(list_tutors::<S>),
        )
        .route("/api/v1/tutors/:email", get(get_tutor::<S>))
        .route("/api/v1/tutors/:email/profile", get(get_tutor_profile::<S>))
        .route(
            "/api/v1/students",
            post(create_student::<S>).get(list_students::<S>),
        )
        .route("/api/v1/students/:email", get(get_student::<S>))
        .route(
            "/api/v1/managers",
            post(create_manager::<S>).get(list_managers::<S>),
        )
        .route("/api/v1/managers/:email", get(get_manager::<S>))
        .route(
            "/api/v1/institutions",
            post(create_institution::<S>).get(list_institutions::<S>),
        )
        .route(
            "/api/v1/courses",
            post(create_course::<S>).get(list_courses::<S>),
        )
        .route("/api/v1/rooms", post(create_room::<S>).get(list_rooms::<S>))
        .route("/api/v1/wages", post(create_wage::<S>).get(list_wages::<S>))
        .route(
            "/api/v1/time-slots",
            post(create_time_slot::<S>).get(list_time_slots::<S>),
        )
        .route("/api/v1/time-slots/:date/:time", get(get_time_slots_at::<S>))
        .route(
            "/api/v1/reviews",
            post(create_review::<S>).get(list_reviews::<S>),
        )
        .route(
            "/api/v1/applications",
            post(create_application::<S>).get(list_applications::<S>),
        )
        .route("/api/v1/applications/:email", get(get_application::<S>))
        .route(
            "/api/v1/requests",
            post(create_request::<S>).get(list_requests::<S>),
        )
        .route("/api/v1/requests/:id", get(get_request::<S>))
        .route("/api/v1/requests/:id/accept", post(accept_request::<S>))
        .route("/api/v1/requests/:id/room", post(assign_room::<S>))
        .route(
            "/api/v1/notifications",
            post(create_notification::<S>).get(list_notifications::<S>),
        )
        .with_state(service)
}

type ServiceState<S> = State<Arc<TutoringService<S>>>;

fn service_error(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::MissingEntity(_) => StatusCode::NOT_FOUND,
        ServiceError::AlreadyAccepted(_) => StatusCode::CONFLICT,
        ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

fn view_error(error: ViewError) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}

fn created<T: Serialize>(view: T) -> Response {
    (StatusCode::CREATED, Json(view)).into_response()
}

fn person_created(result: Result<Person, ServiceError>) -> Response {
    match result.map(|person| views::person_view(Some(&person))) {
        Ok(Ok(view)) => created(view),
        Ok(Err(error)) => view_error(error),
        Err(error) => service_error(error),
    }
}

fn person_listing(result: Result<Vec<Person>, ServiceError>) -> Response {
    match result {
        Ok(people) => {
            let views: Result<Vec<_>, _> = people
                .iter()
                .map(|person| views::person_view(Some(person)))
                .collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

fn person_lookup(result: Result<Option<Person>, ServiceError>, kind: &'static str) -> Response {
    match result {
        Ok(Some(person)) => match views::person_view(Some(&person)) {
            Ok(view) => Json(view).into_response(),
            Err(error) => view_error(error),
        },
        Ok(None) => view_error(ViewError(kind)),
        Err(error) => service_error(error),
    }
}

async fn create_tutor<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<PersonDraft>,
) -> Response {
    person_created(service.create_tutor(draft))
}

async fn list_tutors<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    person_listing(service.tutors())
}

async fn get_tutor<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(email): Path<String>,
) -> Response {
    person_lookup(service.tutor(&email), "Tutor")
}

async fn get_tutor_profile<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(email): Path<String>,
) -> Response {
    match service.tutor_profile(&email) {
        Ok(profile) => match views::tutor_profile_view(profile.as_ref()) {
            Ok(view) => Json(view).into_response(),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn create_student<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<PersonDraft>,
) -> Response {
    person_created(service.create_student(draft))
}

async fn list_students<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    person_listing(service.students())
}

async fn get_student<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(email): Path<String>,
) -> Response {
    person_lookup(service.student(&email), "Student")
}

async fn create_manager<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<PersonDraft>,
) -> Response {
    person_created(service.create_manager(draft))
}

async fn list_managers<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    person_listing(service.managers())
}

async fn get_manager<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(email): Path<String>,
) -> Response {
    person_lookup(service.manager(&email), "Manager")
}

async fn create_institution<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<InstitutionDraft>,
) -> Response {
    match service.create_institution(draft) {
        Ok(institution) => match views::institution_view(Some(&institution)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_institutions<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.institutions() {
        Ok(institutions) => {
            let views: Result<Vec<_>, _> = institutions
                .iter()
                .map(|institution| views::institution_view(Some(institution)))
                .collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

async fn create_course<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<CourseDraft>,
) -> Response {
    match service.create_course(draft) {
        Ok(course) => match service.institution(course.institution) {
            Ok(institution) => {
                match views::course_view(Some(&course), institution.as_ref()) {
                    Ok(view) => created(view),
                    Err(error) => view_error(error),
                }
            }
            Err(error) => service_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_courses<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    let courses = match service.courses() {
        Ok(courses) => courses,
        Err(error) => return service_error(error),
    };
    let mut views = Vec::with_capacity(courses.len());
    for course in &courses {
        let institution = match service.institution(course.institution) {
            Ok(institution) => institution,
            Err(error) => return service_error(error),
        };
        match views::course_view(Some(course), institution.as_ref()) {
            Ok(view) => views.push(view),
            Err(error) => return view_error(error),
        }
    }
    Json(views).into_response()
}

async fn create_room<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<RoomDraft>,
) -> Response {
    match service.create_room(draft) {
        Ok(room) => match views::room_view(Some(&room)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_rooms<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.rooms() {
        Ok(rooms) => {
            let views: Result<Vec<_>, _> =
                rooms.iter().map(|room| views::room_view(Some(room))).collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

async fn create_wage<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<WageDraft>,
) -> Response {
    match service.create_wage(draft) {
        Ok(wage) => match views::wage_view(Some(&wage)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_wages<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.wages() {
        Ok(wages) => {
            let views: Result<Vec<_>, _> =
                wages.iter().map(|wage| views::wage_view(Some(wage))).collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

async fn create_time_slot<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<TimeSlotDraft>,
) -> Response {
    match service.create_time_slot(draft) {
        Ok(slot) => match views::time_slot_view(Some(&slot)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_time_slots<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.time_slots() {
        Ok(slots) => Json(views::time_slot_views(&slots)).into_response(),
        Err(error) => service_error(error),
    }
}

async fn get_time_slots_at<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path((date, time)): Path<(String, String)>,
) -> Response {
    let Ok(date) = date.parse::<NaiveDate>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("'{date}' is not a valid date") })),
        )
            .into_response();
    };
    let Ok(time) = time.parse::<NaiveTime>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("'{time}' is not a valid time") })),
        )
            .into_response();
    };
    match service.time_slots_at(date, time) {
        Ok(slots) => Json(views::time_slot_views(&slots)).into_response(),
        Err(error) => service_error(error),
    }
}

async fn create_review<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<ReviewDraft>,
) -> Response {
    let review = match service.create_review(draft) {
        Ok(review) => review,
        Err(error) => return service_error(error),
    };
    let author = match service.person(review.author) {
        Ok(author) => author,
        Err(error) => return service_error(error),
    };
    let recipient = match service.person(review.recipient) {
        Ok(recipient) => recipient,
        Err(error) => return service_error(error),
    };
    match views::review_view(Some(&review), author.as_ref(), recipient.as_ref()) {
        Ok(view) => created(view),
        Err(error) => view_error(error),
    }
}

async fn list_reviews<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    let reviews = match service.reviews() {
        Ok(reviews) => reviews,
        Err(error) => return service_error(error),
    };
    let mut views = Vec::with_capacity(reviews.len());
    for review in &reviews {
        let author = match service.person(review.author) {
            Ok(author) => author,
            Err(error) => return service_error(error),
        };
        let recipient = match service.person(review.recipient) {
            Ok(recipient) => recipient,
            Err(error) => return service_error(error),
        };
        match views::review_view(Some(review), author.as_ref(), recipient.as_ref()) {
            Ok(view) => views.push(view),
            Err(error) => return view_error(error),
        }
    }
    Json(views).into_response()
}

async fn create_application<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    match service.create_application(draft) {
        Ok(application) => match views::application_view(Some(&application)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_applications<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.applications() {
        Ok(applications) => {
            let views: Result<Vec<_>, _> = applications
                .iter()
                .map(|application| views::application_view(Some(application)))
                .collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

async fn get_application<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(email): Path<String>,
) -> Response {
    match service.application(&email) {
        Ok(application) => match views::application_view(application.as_ref()) {
            Ok(view) => Json(view).into_response(),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn create_request<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<RequestDraft>,
) -> Response {
    let request = match service.create_request(draft) {
        Ok(request) => request,
        Err(error) => return service_error(error),
    };
    match service.request_detail(request.id) {
        Ok(detail) => match views::request_view(detail.as_ref()) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_requests<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.request_details() {
        Ok(details) => {
            let views: Result<Vec<_>, _> = details
                .iter()
                .map(|detail| views::request_view(Some(detail)))
                .collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}

async fn get_request<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(id): Path<u32>,
) -> Response {
    match service.request_detail(RequestId(id)) {
        Ok(detail) => match views::request_view(detail.as_ref()) {
            Ok(view) => Json(view).into_response(),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn accept_request<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(id): Path<u32>,
) -> Response {
    match service.accept_request(RequestId(id)) {
        Ok(notification) => match views::notification_view(Some(&notification)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

#[derive(Debug, Deserialize)]
struct AssignRoomBody {
    room: RoomId,
}

async fn assign_room<S: TutoringStore>(
    State(service): ServiceState<S>,
    Path(id): Path<u32>,
    Json(body): Json<AssignRoomBody>,
) -> Response {
    match service.assign_room(RequestId(id), body.room) {
        Ok(request) => match service.request_detail(request.id) {
            Ok(detail) => match views::request_view(detail.as_ref()) {
                Ok(view) => Json(view).into_response(),
                Err(error) => view_error(error),
            },
            Err(error) => service_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn create_notification<S: TutoringStore>(
    State(service): ServiceState<S>,
    Json(draft): Json<NotificationDraft>,
) -> Response {
    match service.create_notification(draft) {
        Ok(notification) => match views::notification_view(Some(&notification)) {
            Ok(view) => created(view),
            Err(error) => view_error(error),
        },
        Err(error) => service_error(error),
    }
}

async fn list_notifications<S: TutoringStore>(State(service): ServiceState<S>) -> Response {
    match service.notifications() {
        Ok(notifications) => {
            let views: Result<Vec<_>, _> = notifications
                .iter()
                .map(|notification| views::notification_view(Some(notification)))
                .collect();
            match views {
                Ok(views) => Json(views).into_response(),
                Err(error) => view_error(error),
            }
        }
        Err(error) => service_error(error),
    }
}
