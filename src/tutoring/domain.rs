use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier for a registered person (tutor, student, or manager).
///
/// Identifiers are opaque, unique within their entity's table, handed out by the
/// store at insert time, and immutable afterwards. Freshly validated records carry
/// a zero placeholder until the store assigns the real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstitutionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WageId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlotId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u32);

macro_rules! display_id {
    ($($id:ty),+) => {
        $(impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })+
    };
}

display_id!(
    PersonId,
    InstitutionId,
    CourseId,
    WageId,
    TimeSlotId,
    RoomId,
    RequestId,
    NotificationId,
    ReviewId,
    ApplicationId
);

/// Role tag distinguishing the three kinds of registered people.
///
/// Tutors, students, and managers share one identity record; the tag replaces
/// an inheritance hierarchy and keys the per-role natural lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Tutor,
    Student,
    Manager,
}

impl PersonRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tutor => "Tutor",
            Self::Student => "Student",
            Self::Manager => "Manager",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Academic level of a catalogued institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolLevel {
    Cegep,
    CollegePrivate,
    CollegePublic,
    University,
}

impl SchoolLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cegep => "CEGEP",
            Self::CollegePrivate => "Private College",
            Self::CollegePublic => "Public College",
            Self::University => "University",
        }
    }
}

/// A registered person. The same record backs all three roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub role: PersonRole,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A school offering catalogued courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    pub name: String,
    pub level: SchoolLevel,
}

/// A course taught at exactly one institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub subject: String,
    pub institution: InstitutionId,
}

/// A tutor's hourly rate for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wage {
    pub id: WageId,
    pub tutor: PersonId,
    pub course: CourseId,
    pub hourly_rate: u32,
}

/// A tutor-declared block of availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub tutor: PersonId,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// A bookable room sessions can be held in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub number: u32,
    pub capacity: u32,
}

/// A student's ask for a tutoring session on a course at a given tutor,
/// date, and time. The room stays empty until a manager assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub tutor: PersonId,
    pub student: PersonId,
    pub course: CourseId,
    pub room: Option<RoomId>,
}

/// Acceptance marker attached to exactly one request.
///
/// The foreign key lives on this side only; the one-to-one constraint is
/// enforced by the service before a second notification can be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub request: RequestId,
}

/// Feedback left by one person about another after a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: u8,
    pub comment: Option<String>,
    pub author: PersonId,
    pub recipient: PersonId,
}

/// A prospective tutor's intake application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub is_existing_user: bool,
    pub name: String,
    pub email: String,
    pub courses: String,
}

/// Lifecycle of a request: created on submission, accepted once a
/// notification is attached. There is no reject or cancel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Created,
    Accepted,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Accepted => "accepted",
        }
    }
}

/// Candidate field set for a person registration. `None` models an
/// unsupplied field; validation turns a draft into a storable record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstitutionDraft {
    pub name: Option<String>,
    pub level: Option<SchoolLevel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub institution: Option<InstitutionId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WageDraft {
    pub tutor: Option<PersonId>,
    pub course: Option<CourseId>,
    pub hourly_rate: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSlotDraft {
    pub tutor: Option<PersonId>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomDraft {
    pub number: Option<u32>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestDraft {
    pub time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub tutor: Option<PersonId>,
    pub student: Option<PersonId>,
    pub course: Option<CourseId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub request: Option<RequestId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub author: Option<PersonId>,
    pub recipient: Option<PersonId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub is_existing_user: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub courses: Option<String>,
}

/// A request with every referenced entity resolved, ready for wire mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDetail {
    pub request: Request,
    pub tutor: Person,
    pub student: Person,
    pub course: Course,
    pub institution: Institution,
    pub room: Option<Room>,
    pub notification: Option<Notification>,
}

impl RequestDetail {
    pub fn status(&self) -> RequestStatus {
        if self.notification.is_some() {
            RequestStatus::Accepted
        } else {
            RequestStatus::Created
        }
    }
}

/// One of a tutor's requests together with its acceptance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    pub request: Request,
    pub accepted: bool,
}

/// Everything attached to a tutor: availability, per-course rates, and the
/// requests addressed to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorProfile {
    pub tutor: Person,
    pub time_slots: Vec<TimeSlot>,
    pub wages: Vec<Wage>,
    pub requests: Vec<RequestState>,
}
