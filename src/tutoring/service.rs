//! The domain service facade.
//!
//! Every entity enters the system through one of the `create_*` operations:
//! the draft is validated, referenced entities are checked for existence, and
//! only then does the store see a write. Nothing here flushes implicitly; a
//! mutated record becomes visible only after an explicit `save_*` call on the
//! store. Lookups by natural key return `None` for absence, which callers
//! must branch on; only the acceptance and room-assignment workflows treat a
//! missing referenced entity as an error.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use super::domain::{
    Application, ApplicationDraft, Course, CourseDraft, CourseId, Institution, InstitutionDraft,
    InstitutionId, Notification, NotificationDraft, Person, PersonDraft, PersonId, PersonRole,
    Request, RequestDetail, RequestDraft, RequestId, RequestState, Review, ReviewDraft, Room,
    RoomDraft, RoomId, TimeSlot, TimeSlotDraft, TutorProfile, Wage, WageDraft,
};
use super::repository::{RepositoryError, TutoringStore};
use super::validation::{self, ValidationError};

/// Failures raised by the domain service before any state mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// A workflow or creation referenced an entity the store does not hold.
    #[error("There is no such {0}!")]
    MissingEntity(&'static str),
    /// The one-to-one request-notification constraint would be broken.
    #[error("Request {0} has already been accepted!")]
    AlreadyAccepted(RequestId),
}

/// Single entry point for constructing, persisting, and querying entities.
pub struct TutoringService<S> {
    store: Arc<S>,
}

impl<S: TutoringStore> TutoringService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    // People

    pub fn create_tutor(&self, draft: PersonDraft) -> Result<Person, ServiceError> {
        self.create_person(PersonRole::Tutor, draft)
    }

    pub fn create_student(&self, draft: PersonDraft) -> Result<Person, ServiceError> {
        self.create_person(PersonRole::Student, draft)
    }

    pub fn create_manager(&self, draft: PersonDraft) -> Result<Person, ServiceError> {
        self.create_person(PersonRole::Manager, draft)
    }

    fn create_person(&self, role: PersonRole, draft: PersonDraft) -> Result<Person, ServiceError> {
        let person = validation::person(role, draft)?;
        let stored = self.store.insert_person(person)?;
        debug!(id = %stored.id, role = %role, "registered person");
        Ok(stored)
    }

    pub fn tutors(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(self.store.persons_with_role(PersonRole::Tutor)?)
    }

    pub fn students(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(self.store.persons_with_role(PersonRole::Student)?)
    }

    pub fn managers(&self) -> Result<Vec<Person>, ServiceError> {
        Ok(self.store.persons_with_role(PersonRole::Manager)?)
    }

    pub fn tutor(&self, email: &str) -> Result<Option<Person>, ServiceError> {
        Ok(self.store.person_by_email(PersonRole::Tutor, email)?)
    }

    pub fn student(&self, email: &str) -> Result<Option<Person>, ServiceError> {
        Ok(self.store.person_by_email(PersonRole::Student, email)?)
    }

    pub fn manager(&self, email: &str) -> Result<Option<Person>, ServiceError> {
        Ok(self.store.person_by_email(PersonRole::Manager, email)?)
    }

    pub fn person(&self, id: PersonId) -> Result<Option<Person>, ServiceError> {
        Ok(self.store.person_by_id(id)?)
    }

    // Catalogue

    pub fn create_institution(
        &self,
        draft: InstitutionDraft,
    ) -> Result<Institution, ServiceError> {
        let institution = validation::institution(draft)?;
        Ok(self.store.insert_institution(institution)?)
    }

    pub fn institutions(&self) -> Result<Vec<Institution>, ServiceError> {
        Ok(self.store.all_institutions()?)
    }

    pub fn institution(&self, id: InstitutionId) -> Result<Option<Institution>, ServiceError> {
        Ok(self.store.institution_by_id(id)?)
    }

    pub fn create_course(&self, draft: CourseDraft) -> Result<Course, ServiceError> {
        let course = validation::course(draft)?;
        self.store
            .institution_by_id(course.institution)?
            .ok_or(ServiceError::MissingEntity("Institution"))?;
        Ok(self.store.insert_course(course)?)
    }

    pub fn courses(&self) -> Result<Vec<Course>, ServiceError> {
        Ok(self.store.all_courses()?)
    }

    pub fn course(&self, id: CourseId) -> Result<Option<Course>, ServiceError> {
        Ok(self.store.course_by_id(id)?)
    }

    // Tutor offerings

    pub fn create_wage(&self, draft: WageDraft) -> Result<Wage, ServiceError> {
        let wage = validation::wage(draft)?;
        self.person_in_role(wage.tutor, PersonRole::Tutor)?;
        self.store
            .course_by_id(wage.course)?
            .ok_or(ServiceError::MissingEntity("Course"))?;
        Ok(self.store.insert_wage(wage)?)
    }

    pub fn wages(&self) -> Result<Vec<Wage>, ServiceError> {
        Ok(self.store.all_wages()?)
    }

    pub fn create_time_slot(&self, draft: TimeSlotDraft) -> Result<TimeSlot, ServiceError> {
        let slot = validation::time_slot(draft)?;
        self.person_in_role(slot.tutor, PersonRole::Tutor)?;
        Ok(self.store.insert_time_slot(slot)?)
    }

    pub fn time_slots(&self) -> Result<Vec<TimeSlot>, ServiceError> {
        Ok(self.store.all_time_slots()?)
    }

    pub fn time_slots_at(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Vec<TimeSlot>, ServiceError> {
        Ok(self.store.time_slots_at(date, time)?)
    }

    // Rooms

    pub fn create_room(&self, draft: RoomDraft) -> Result<Room, ServiceError> {
        let room = validation::room(draft)?;
        Ok(self.store.insert_room(room)?)
    }

    pub fn rooms(&self) -> Result<Vec<Room>, ServiceError> {
        Ok(self.store.all_rooms()?)
    }

    pub fn room(&self, id: RoomId) -> Result<Option<Room>, ServiceError> {
        Ok(self.store.room_by_id(id)?)
    }

    // Requests and acceptance

    pub fn create_request(&self, draft: RequestDraft) -> Result<Request, ServiceError> {
        let request = validation::request(draft)?;
        self.person_in_role(request.tutor, PersonRole::Tutor)?;
        self.person_in_role(request.student, PersonRole::Student)?;
        self.store
            .course_by_id(request.course)?
            .ok_or(ServiceError::MissingEntity("Course"))?;
        let stored = self.store.insert_request(request)?;
        debug!(id = %stored.id, "session request recorded");
        Ok(stored)
    }

    pub fn requests(&self) -> Result<Vec<Request>, ServiceError> {
        Ok(self.store.all_requests()?)
    }

    pub fn request(&self, id: RequestId) -> Result<Option<Request>, ServiceError> {
        Ok(self.store.request_by_id(id)?)
    }

    /// Puts a request into a room. Runs as its own step before or after
    /// acceptance; accepting never picks a room on its own.
    pub fn assign_room(
        &self,
        request_id: RequestId,
        room_id: RoomId,
    ) -> Result<Request, ServiceError> {
        let mut request = self
            .store
            .request_by_id(request_id)?
            .ok_or(ServiceError::MissingEntity("Request"))?;
        self.store
            .room_by_id(room_id)?
            .ok_or(ServiceError::MissingEntity("Room"))?;
        request.room = Some(room_id);
        self.store.save_request(request.clone())?;
        Ok(request)
    }

    /// The one state transition in the model: attaches a notification to an
    /// existing request, marking it accepted. A second acceptance of the same
    /// request is rejected so that the one-to-one attachment stays a fact
    /// rather than a convention.
    pub fn accept_request(&self, id: RequestId) -> Result<Notification, ServiceError> {
        self.store
            .request_by_id(id)?
            .ok_or(ServiceError::MissingEntity("Request"))?;
        let notification = self.create_notification(NotificationDraft { request: Some(id) })?;
        info!(request = %id, notification = %notification.id, "request accepted");
        Ok(notification)
    }

    pub fn create_notification(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, ServiceError> {
        let notification = validation::notification(draft)?;
        self.store
            .request_by_id(notification.request)?
            .ok_or(ServiceError::MissingEntity("Request"))?;
        if self
            .store
            .notification_for_request(notification.request)?
            .is_some()
        {
            return Err(ServiceError::AlreadyAccepted(notification.request));
        }
        Ok(self.store.insert_notification(notification)?)
    }

    pub fn notifications(&self) -> Result<Vec<Notification>, ServiceError> {
        Ok(self.store.all_notifications()?)
    }

    // Reviews

    pub fn create_review(&self, draft: ReviewDraft) -> Result<Review, ServiceError> {
        let review = validation::review(draft)?;
        self.store
            .person_by_id(review.author)?
            .ok_or(ServiceError::MissingEntity("Person"))?;
        self.store
            .person_by_id(review.recipient)?
            .ok_or(ServiceError::MissingEntity("Person"))?;
        Ok(self.store.insert_review(review)?)
    }

    pub fn reviews(&self) -> Result<Vec<Review>, ServiceError> {
        Ok(self.store.all_reviews()?)
    }

    // Applications

    pub fn create_application(
        &self,
        draft: ApplicationDraft,
    ) -> Result<Application, ServiceError> {
        let application = validation::application(draft)?;
        Ok(self.store.insert_application(application)?)
    }

    pub fn applications(&self) -> Result<Vec<Application>, ServiceError> {
        Ok(self.store.all_applications()?)
    }

    pub fn application(&self, email: &str) -> Result<Option<Application>, ServiceError> {
        Ok(self.store.application_by_email(email)?)
    }

    // Resolved aggregates for the wire layer

    pub fn request_detail(&self, id: RequestId) -> Result<Option<RequestDetail>, ServiceError> {
        match self.store.request_by_id(id)? {
            Some(request) => Ok(Some(self.resolve_request(request)?)),
            None => Ok(None),
        }
    }

    pub fn request_details(&self) -> Result<Vec<RequestDetail>, ServiceError> {
        self.store
            .all_requests()?
            .into_iter()
            .map(|request| self.resolve_request(request))
            .collect()
    }

    pub fn tutor_profile(&self, email: &str) -> Result<Option<TutorProfile>, ServiceError> {
        let Some(tutor) = self.store.person_by_email(PersonRole::Tutor, email)? else {
            return Ok(None);
        };

        let time_slots = self
            .store
            .all_time_slots()?
            .into_iter()
            .filter(|slot| slot.tutor == tutor.id)
            .collect();
        let wages = self
            .store
            .all_wages()?
            .into_iter()
            .filter(|wage| wage.tutor == tutor.id)
            .collect();
        let requests = self
            .store
            .all_requests()?
            .into_iter()
            .filter(|request| request.tutor == tutor.id)
            .map(|request| {
                let accepted = self.store.notification_for_request(request.id)?.is_some();
                Ok(RequestState { request, accepted })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;

        Ok(Some(TutorProfile {
            tutor,
            time_slots,
            wages,
            requests,
        }))
    }

    /// Drops every stored record, children before parents. Test teardown and
    /// nothing else; there is no per-record delete in the workflow.
    pub fn clear_all(&self) -> Result<(), ServiceError> {
        self.store.clear_notifications()?;
        self.store.clear_requests()?;
        self.store.clear_reviews()?;
        self.store.clear_wages()?;
        self.store.clear_time_slots()?;
        self.store.clear_applications()?;
        self.store.clear_courses()?;
        self.store.clear_institutions()?;
        self.store.clear_rooms()?;
        self.store.clear_persons()?;
        Ok(())
    }

    fn person_in_role(&self, id: PersonId, role: PersonRole) -> Result<Person, ServiceError> {
        self.store
            .person_by_id(id)?
            .filter(|person| person.role == role)
            .ok_or(ServiceError::MissingEntity(role.label()))
    }

    fn resolve_request(&self, request: Request) -> Result<RequestDetail, ServiceError> {
        let tutor = self.person_in_role(request.tutor, PersonRole::Tutor)?;
        let student = self.person_in_role(request.student, PersonRole::Student)?;
        let course = self
            .store
            .course_by_id(request.course)?
            .ok_or(ServiceError::MissingEntity("Course"))?;
        let institution = self
            .store
            .institution_by_id(course.institution)?
            .ok_or(ServiceError::MissingEntity("Institution"))?;
        let room = match request.room {
            Some(id) => Some(
                self.store
                    .room_by_id(id)?
                    .ok_or(ServiceError::MissingEntity("Room"))?,
            ),
            None => None,
        };
        let notification = self.store.notification_for_request(request.id)?;

        Ok(RequestDetail {
            request,
            tutor,
            student,
            course,
            institution,
            room,
            notification,
        })
    }
}
