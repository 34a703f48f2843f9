//! Tutoring-session matching: entities, validation rules, the domain service
//! facade, and the wire/transport surfaces around it.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDraft, ApplicationId, Course, CourseDraft, CourseId, Institution,
    InstitutionDraft, InstitutionId, Notification, NotificationDraft, NotificationId, Person,
    PersonDraft, PersonId, PersonRole, Request, RequestDetail, RequestDraft, RequestId,
    RequestState, RequestStatus, Review, ReviewDraft, ReviewId, Room, RoomDraft, RoomId,
    SchoolLevel, TimeSlot, TimeSlotDraft, TimeSlotId, TutorProfile, Wage, WageDraft, WageId,
};
pub use intake::{ApplicationCsvImporter, IntakeError, IntakeSummary, RejectedRow};
pub use repository::{
    ApplicationRepository, CourseRepository, InstitutionRepository, NotificationRepository,
    PersonRepository, RepositoryError, RequestRepository, ReviewRepository, RoomRepository,
    TimeSlotRepository, TutoringStore, WageRepository,
};
pub use router::tutoring_router;
pub use service::{ServiceError, TutoringService};
pub use store::MemoryStore;
pub use validation::ValidationError;
pub use views::ViewError;
