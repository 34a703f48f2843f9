//! Persistence collaborator contracts.
//!
//! One trait per entity kind, each offering the same primitives: `insert`
//! (assigns the identifier and returns the stored record), `save` (explicit
//! persist of a mutated record), lookup by id, the full table, and a bulk
//! clear used for teardown. Natural-key finders (`by_email`, date-and-time,
//! by-request) sit on the traits that need them. Implementations own
//! identifier assignment and write serialization; the service layer never
//! constructs or mutates storage directly.

use chrono::{NaiveDate, NaiveTime};

use super::domain::{
    Application, ApplicationId, Course, CourseId, Institution, InstitutionId, Notification,
    NotificationId, Person, PersonId, PersonRole, Request, RequestId, Review, ReviewId, Room,
    RoomId, TimeSlot, TimeSlotId, Wage, WageId,
};

/// Failures surfaced by a persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// An explicit save referenced a record the store has never assigned.
    #[error("record not found")]
    NotFound,
}

pub trait PersonRepository: Send + Sync {
    fn insert_person(&self, person: Person) -> Result<Person, RepositoryError>;
    fn save_person(&self, person: Person) -> Result<(), RepositoryError>;
    fn person_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError>;
    fn person_by_email(
        &self,
        role: PersonRole,
        email: &str,
    ) -> Result<Option<Person>, RepositoryError>;
    fn persons_with_role(&self, role: PersonRole) -> Result<Vec<Person>, RepositoryError>;
    fn clear_persons(&self) -> Result<(), RepositoryError>;
}

pub trait InstitutionRepository: Send + Sync {
    fn insert_institution(&self, institution: Institution)
        -> Result<Institution, RepositoryError>;
    fn save_institution(&self, institution: Institution) -> Result<(), RepositoryError>;
    fn institution_by_id(&self, id: InstitutionId)
        -> Result<Option<Institution>, RepositoryError>;
    fn all_institutions(&self) -> Result<Vec<Institution>, RepositoryError>;
    fn clear_institutions(&self) -> Result<(), RepositoryError>;
}

pub trait CourseRepository: Send + Sync {
    fn insert_course(&self, course: Course) -> Result<Course, RepositoryError>;
    fn save_course(&self, course: Course) -> Result<(), RepositoryError>;
    fn course_by_id(&self, id: CourseId) -> Result<Option<Course>, RepositoryError>;
    fn all_courses(&self) -> Result<Vec<Course>, RepositoryError>;
    fn clear_courses(&self) -> Result<(), RepositoryError>;
}

pub trait WageRepository: Send + Sync {
    fn insert_wage(&self, wage: Wage) -> Result<Wage, RepositoryError>;
    fn save_wage(&self, wage: Wage) -> Result<(), RepositoryError>;
    fn wage_by_id(&self, id: WageId) -> Result<Option<Wage>, RepositoryError>;
    fn all_wages(&self) -> Result<Vec<Wage>, RepositoryError>;
    fn clear_wages(&self) -> Result<(), RepositoryError>;
}

pub trait TimeSlotRepository: Send + Sync {
    fn insert_time_slot(&self, slot: TimeSlot) -> Result<TimeSlot, RepositoryError>;
    fn save_time_slot(&self, slot: TimeSlot) -> Result<(), RepositoryError>;
    fn time_slot_by_id(&self, id: TimeSlotId) -> Result<Option<TimeSlot>, RepositoryError>;
    /// All slots declared for the given date and time; the pair is a
    /// non-unique natural key, so several tutors may match.
    fn time_slots_at(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Vec<TimeSlot>, RepositoryError>;
    fn all_time_slots(&self) -> Result<Vec<TimeSlot>, RepositoryError>;
    fn clear_time_slots(&self) -> Result<(), RepositoryError>;
}

pub trait RoomRepository: Send + Sync {
    fn insert_room(&self, room: Room) -> Result<Room, RepositoryError>;
    fn save_room(&self, room: Room) -> Result<(), RepositoryError>;
    fn room_by_id(&self, id: RoomId) -> Result<Option<Room>, RepositoryError>;
    fn all_rooms(&self) -> Result<Vec<Room>, RepositoryError>;
    fn clear_rooms(&self) -> Result<(), RepositoryError>;
}

pub trait RequestRepository: Send + Sync {
    fn insert_request(&self, request: Request) -> Result<Request, RepositoryError>;
    fn save_request(&self, request: Request) -> Result<(), RepositoryError>;
    fn request_by_id(&self, id: RequestId) -> Result<Option<Request>, RepositoryError>;
    fn all_requests(&self) -> Result<Vec<Request>, RepositoryError>;
    fn clear_requests(&self) -> Result<(), RepositoryError>;
}

pub trait NotificationRepository: Send + Sync {
    fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, RepositoryError>;
    fn save_notification(&self, notification: Notification) -> Result<(), RepositoryError>;
    fn notification_by_id(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;
    /// The notification attached to a request, if any. Backs the one-to-one
    /// check the service runs before acceptance.
    fn notification_for_request(
        &self,
        request: RequestId,
    ) -> Result<Option<Notification>, RepositoryError>;
    fn all_notifications(&self) -> Result<Vec<Notification>, RepositoryError>;
    fn clear_notifications(&self) -> Result<(), RepositoryError>;
}

pub trait ReviewRepository: Send + Sync {
    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError>;
    fn save_review(&self, review: Review) -> Result<(), RepositoryError>;
    fn review_by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError>;
    fn all_reviews(&self) -> Result<Vec<Review>, RepositoryError>;
    fn clear_reviews(&self) -> Result<(), RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    fn insert_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn save_application(&self, application: Application) -> Result<(), RepositoryError>;
    fn application_by_id(&self, id: ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    fn application_by_email(&self, email: &str) -> Result<Option<Application>, RepositoryError>;
    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError>;
    fn clear_applications(&self) -> Result<(), RepositoryError>;
}

/// The full persistence surface the domain service is injected with.
pub trait TutoringStore:
    PersonRepository
    + InstitutionRepository
    + CourseRepository
    + WageRepository
    + TimeSlotRepository
    + RoomRepository
    + RequestRepository
    + NotificationRepository
    + ReviewRepository
    + ApplicationRepository
{
}

impl<S> TutoringStore for S where
    S: PersonRepository
        + InstitutionRepository
        + CourseRepository
        + WageRepository
        + TimeSlotRepository
        + RoomRepository
        + RequestRepository
        + NotificationRepository
        + ReviewRepository
        + ApplicationRepository
{
}
