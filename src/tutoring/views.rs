//! Wire-safe copies of the entity graph.
//!
//! Relationships flatten into nested view records instead of live references,
//! so serializing never walks the tutor/request/notification cycle. Singular
//! mapping functions take an `Option` and fail outright on an absent source,
//! naming the entity that was missing; collection-valued relationships map
//! element-wise, preserving count but promising nothing about order.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, Course, CourseId, Institution, InstitutionId, Notification,
    NotificationId, Person, PersonId, RequestDetail, RequestId, RequestState, RequestStatus,
    Review, ReviewId, Room, RoomId, SchoolLevel, TimeSlot, TimeSlotId, TutorProfile, Wage, WageId,
};

/// Raised when a mapping is asked to render an entity that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("There is no such {0}!")]
pub struct ViewError(pub &'static str);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionView {
    pub id: InstitutionId,
    pub name: String,
    pub level: SchoolLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseView {
    pub id: CourseId,
    pub name: String,
    pub subject: String,
    pub institution: InstitutionView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageView {
    pub id: WageId,
    pub tutor: PersonId,
    pub course: CourseId,
    pub hourly_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotView {
    pub id: TimeSlotId,
    pub tutor: PersonId,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub number: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub request: RequestId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub rating: u8,
    pub comment: Option<String>,
    pub author: PersonView,
    pub recipient: PersonView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub is_existing_user: bool,
    pub name: String,
    pub email: String,
    pub courses: String,
}

/// A fully resolved request: people and catalogue entries nest as flat
/// views, the notification rides along when the request has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    pub id: RequestId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: RequestStatus,
    pub tutor: PersonView,
    pub student: PersonView,
    pub course: CourseView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationView>,
}

/// Request entry inside a tutor profile. Kept to identifiers on the person
/// side so the profile does not recurse back into the tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummaryView {
    pub id: RequestId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: RequestStatus,
    pub student: PersonId,
    pub course: CourseId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorProfileView {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub time_slots: Vec<TimeSlotView>,
    pub wages: Vec<WageView>,
    pub requests: Vec<RequestSummaryView>,
}

pub fn person_view(person: Option<&Person>) -> Result<PersonView, ViewError> {
    let person = person.ok_or(ViewError("Person"))?;
    Ok(PersonView {
        id: person.id,
        name: person.name.clone(),
        email: person.email.clone(),
        password: person.password.clone(),
    })
}

pub fn institution_view(institution: Option<&Institution>) -> Result<InstitutionView, ViewError> {
    let institution = institution.ok_or(ViewError("Institution"))?;
    Ok(InstitutionView {
        id: institution.id,
        name: institution.name.clone(),
        level: institution.level,
    })
}

pub fn course_view(
    course: Option<&Course>,
    institution: Option<&Institution>,
) -> Result<CourseView, ViewError> {
    let course = course.ok_or(ViewError("Course"))?;
    Ok(CourseView {
        id: course.id,
        name: course.name.clone(),
        subject: course.subject.clone(),
        institution: institution_view(institution)?,
    })
}

pub fn wage_view(wage: Option<&Wage>) -> Result<WageView, ViewError> {
    let wage = wage.ok_or(ViewError("Wage"))?;
    Ok(WageView {
        id: wage.id,
        tutor: wage.tutor,
        course: wage.course,
        hourly_rate: wage.hourly_rate,
    })
}

pub fn time_slot_view(slot: Option<&TimeSlot>) -> Result<TimeSlotView, ViewError> {
    let slot = slot.ok_or(ViewError("TimeSlot"))?;
    Ok(TimeSlotView {
        id: slot.id,
        tutor: slot.tutor,
        date: slot.date,
        time: slot.time,
    })
}

pub fn time_slot_views(slots: &[TimeSlot]) -> Vec<TimeSlotView> {
    slots
        .iter()
        .map(|slot| TimeSlotView {
            id: slot.id,
            tutor: slot.tutor,
            date: slot.date,
            time: slot.time,
        })
        .collect()
}

pub fn room_view(room: Option<&Room>) -> Result<RoomView, ViewError> {
    let room = room.ok_or(ViewError("Room"))?;
    Ok(RoomView {
        id: room.id,
        number: room.number,
        capacity: room.capacity,
    })
}

pub fn notification_view(
    notification: Option<&Notification>,
) -> Result<NotificationView, ViewError> {
    let notification = notification.ok_or(ViewError("Notification"))?;
    Ok(NotificationView {
        id: notification.id,
        request: notification.request,
    })
}

pub fn review_view(
    review: Option<&Review>,
    author: Option<&Person>,
    recipient: Option<&Person>,
) -> Result<ReviewView, ViewError> {
    let review = review.ok_or(ViewError("Review"))?;
    Ok(ReviewView {
        id: review.id,
        rating: review.rating,
        comment: review.comment.clone(),
        author: person_view(author)?,
        recipient: person_view(recipient)?,
    })
}

pub fn application_view(application: Option<&Application>) -> Result<ApplicationView, ViewError> {
    let application = application.ok_or(ViewError("Application"))?;
    Ok(ApplicationView {
        id: application.id,
        is_existing_user: application.is_existing_user,
        name: application.name.clone(),
        email: application.email.clone(),
        courses: application.courses.clone(),
    })
}

pub fn request_view(detail: Option<&RequestDetail>) -> Result<RequestView, ViewError> {
    let detail = detail.ok_or(ViewError("Request"))?;
    let room = match (&detail.request.room, &detail.room) {
        (None, _) => None,
        (Some(_), Some(room)) => Some(room_view(Some(room))?),
        (Some(_), None) => return Err(ViewError("Room")),
    };
    let notification = detail
        .notification
        .as_ref()
        .map(|notification| notification_view(Some(notification)))
        .transpose()?;

    Ok(RequestView {
        id: detail.request.id,
        date: detail.request.date,
        time: detail.request.time,
        status: detail.status(),
        tutor: person_view(Some(&detail.tutor))?,
        student: person_view(Some(&detail.student))?,
        course: course_view(Some(&detail.course), Some(&detail.institution))?,
        room,
        notification,
    })
}

pub fn request_summary_view(state: &RequestState) -> RequestSummaryView {
    let status = if state.accepted {
        RequestStatus::Accepted
    } else {
        RequestStatus::Created
    };
    RequestSummaryView {
        id: state.request.id,
        date: state.request.date,
        time: state.request.time,
        status,
        student: state.request.student,
        course: state.request.course,
    }
}

pub fn tutor_profile_view(profile: Option<&TutorProfile>) -> Result<TutorProfileView, ViewError> {
    let profile = profile.ok_or(ViewError("Tutor"))?;
    Ok(TutorProfileView {
        id: profile.tutor.id,
        name: profile.tutor.name.clone(),
        email: profile.tutor.email.clone(),
        time_slots: time_slot_views(&profile.time_slots),
        wages: profile
            .wages
            .iter()
            .map(|wage| wage_view(Some(wage)))
            .collect::<Result<_, _>>()?,
        requests: profile.requests.iter().map(request_summary_view).collect(),
    })
}
