//! Precondition checks applied before any record is constructed.
//!
//! Each function turns a candidate draft into a storable record or fails with
//! the first broken rule. Rules run in a fixed order per entity and only the
//! first failure is surfaced; the message strings are asserted verbatim by
//! consumers, so they are part of the external contract.

use super::domain::{
    Application, ApplicationDraft, ApplicationId, Course, CourseDraft, CourseId, Institution,
    InstitutionDraft, InstitutionId, Notification, NotificationDraft, NotificationId, Person,
    PersonDraft, PersonId, PersonRole, Request, RequestDraft, RequestId, Review, ReviewDraft,
    ReviewId, Room, RoomDraft, RoomId, TimeSlot, TimeSlotDraft, TimeSlotId, Wage, WageDraft,
    WageId,
};

/// A rejected draft. Every variant carries a fixed, human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} name, email or password cannot be empty!")]
    PersonCredentials(PersonRole),
    #[error("Course name cannot be empty!")]
    CourseName,
    #[error("Institution name cannot be null!")]
    InstitutionName,
    #[error("A school level needs to be specified!")]
    MissingSchoolLevel,
    #[error("An institution needs to be specified!")]
    MissingInstitution,
    #[error("Room number cannot be empty!")]
    RoomNumber,
    #[error("Room capacity cannot be empty!")]
    RoomCapacity,
    #[error("Time cannot be empty!")]
    MissingTime,
    #[error("Date cannot be empty!")]
    MissingDate,
    #[error("A tutor needs to be specified!")]
    MissingTutor,
    #[error("A student needs to be specified!")]
    MissingStudent,
    #[error("A course needs to be specified!")]
    MissingCourse,
    #[error("An hourly rate needs to be specified!")]
    MissingHourlyRate,
    #[error("Notification ID cannot be null!")]
    MissingNotificationRequest,
    #[error("Rating cannot be null!")]
    MissingRating,
    #[error("A review author needs to be specified!")]
    MissingReviewAuthor,
    #[error("A review recipient needs to be specified!")]
    MissingReviewRecipient,
    #[error("Application name cannot be empty!")]
    ApplicationName,
    #[error("Application email cannot be empty!")]
    ApplicationEmail,
}

fn filled(field: &Option<String>) -> Option<String> {
    field.clone().filter(|value| !value.is_empty())
}

/// Name, email, and password must each be present and non-empty. A single
/// message covers all three fields, as the rule is one check over the set.
pub fn person(role: PersonRole, draft: PersonDraft) -> Result<Person, ValidationError> {
    let name = filled(&draft.name).ok_or(ValidationError::PersonCredentials(role))?;
    let email = filled(&draft.email).ok_or(ValidationError::PersonCredentials(role))?;
    let password = filled(&draft.password).ok_or(ValidationError::PersonCredentials(role))?;

    Ok(Person {
        id: PersonId(0),
        role,
        name,
        email,
        password,
    })
}

pub fn institution(draft: InstitutionDraft) -> Result<Institution, ValidationError> {
    let name = filled(&draft.name).ok_or(ValidationError::InstitutionName)?;
    let level = draft.level.ok_or(ValidationError::MissingSchoolLevel)?;

    Ok(Institution {
        id: InstitutionId(0),
        name,
        level,
    })
}

pub fn course(draft: CourseDraft) -> Result<Course, ValidationError> {
    let name = filled(&draft.name).ok_or(ValidationError::CourseName)?;
    let institution = draft.institution.ok_or(ValidationError::MissingInstitution)?;

    Ok(Course {
        id: CourseId(0),
        name,
        subject: draft.subject.unwrap_or_default(),
        institution,
    })
}

pub fn wage(draft: WageDraft) -> Result<Wage, ValidationError> {
    let tutor = draft.tutor.ok_or(ValidationError::MissingTutor)?;
    let course = draft.course.ok_or(ValidationError::MissingCourse)?;
    let hourly_rate = draft.hourly_rate.ok_or(ValidationError::MissingHourlyRate)?;

    Ok(Wage {
        id: WageId(0),
        tutor,
        course,
        hourly_rate,
    })
}

pub fn time_slot(draft: TimeSlotDraft) -> Result<TimeSlot, ValidationError> {
    let tutor = draft.tutor.ok_or(ValidationError::MissingTutor)?;
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    let time = draft.time.ok_or(ValidationError::MissingTime)?;

    Ok(TimeSlot {
        id: TimeSlotId(0),
        tutor,
        date,
        time,
    })
}

pub fn room(draft: RoomDraft) -> Result<Room, ValidationError> {
    let number = draft.number.ok_or(ValidationError::RoomNumber)?;
    let capacity = draft.capacity.ok_or(ValidationError::RoomCapacity)?;

    Ok(Room {
        id: RoomId(0),
        number,
        capacity,
    })
}

/// Time is checked before every other field so that a fully empty draft
/// reports the missing time, matching what consumers assert.
pub fn request(draft: RequestDraft) -> Result<Request, ValidationError> {
    let time = draft.time.ok_or(ValidationError::MissingTime)?;
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    let tutor = draft.tutor.ok_or(ValidationError::MissingTutor)?;
    let student = draft.student.ok_or(ValidationError::MissingStudent)?;
    let course = draft.course.ok_or(ValidationError::MissingCourse)?;

    Ok(Request {
        id: RequestId(0),
        date,
        time,
        tutor,
        student,
        course,
        room: None,
    })
}

pub fn notification(draft: NotificationDraft) -> Result<Notification, ValidationError> {
    let request = draft
        .request
        .ok_or(ValidationError::MissingNotificationRequest)?;

    Ok(Notification {
        id: NotificationId(0),
        request,
    })
}

/// Rating is checked first, before author and recipient.
pub fn review(draft: ReviewDraft) -> Result<Review, ValidationError> {
    let rating = draft.rating.ok_or(ValidationError::MissingRating)?;
    let author = draft.author.ok_or(ValidationError::MissingReviewAuthor)?;
    let recipient = draft.recipient.ok_or(ValidationError::MissingReviewRecipient)?;

    Ok(Review {
        id: ReviewId(0),
        rating,
        comment: draft.comment,
        author,
        recipient,
    })
}

pub fn application(draft: ApplicationDraft) -> Result<Application, ValidationError> {
    let name = filled(&draft.name).ok_or(ValidationError::ApplicationName)?;
    let email = filled(&draft.email).ok_or(ValidationError::ApplicationEmail)?;

    Ok(Application {
        id: ApplicationId(0),
        is_existing_user: draft.is_existing_user.unwrap_or(false),
        name,
        email,
        courses: draft.courses.unwrap_or_default(),
    })
}
