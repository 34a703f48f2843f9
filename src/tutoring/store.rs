//! In-memory persistence collaborator.
//!
//! Each table is a mutex-guarded ordered map keyed by the raw identifier,
//! with a per-table sequence handing out ids starting at 1. The ordered map
//! makes the full-table listings come back in id order, which keeps reads
//! deterministic without promising any semantic ordering.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};

use super::domain::{
    Application, ApplicationId, Course, CourseId, Institution, InstitutionId, Notification,
    NotificationId, Person, PersonId, PersonRole, Request, RequestId, Review, ReviewId, Room,
    RoomId, TimeSlot, TimeSlotId, Wage, WageId,
};
use super::repository::{
    ApplicationRepository, CourseRepository, InstitutionRepository, NotificationRepository,
    PersonRepository, RepositoryError, RequestRepository, ReviewRepository, RoomRepository,
    TimeSlotRepository, WageRepository,
};

/// Glue letting one generic table type hold any entity.
trait StoredRecord: Clone {
    fn raw_id(&self) -> u32;
    fn set_raw_id(&mut self, raw: u32);
}

macro_rules! stored_record {
    ($($entity:ty => $id:ident),+ $(,)?) => {
        $(impl StoredRecord for $entity {
            fn raw_id(&self) -> u32 {
                self.id.0
            }

            fn set_raw_id(&mut self, raw: u32) {
                self.id = $id(raw);
            }
        })+
    };
}

stored_record!(
    Person => PersonId,
    Institution => InstitutionId,
    Course => CourseId,
    Wage => WageId,
    TimeSlot => TimeSlotId,
    Room => RoomId,
    Request => RequestId,
    Notification => NotificationId,
    Review => ReviewId,
    Application => ApplicationId,
);

struct MemTable<T> {
    rows: Mutex<BTreeMap<u32, T>>,
    sequence: AtomicU32,
}

impl<T> Default for MemTable<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            sequence: AtomicU32::new(1),
        }
    }
}

impl<T: StoredRecord> MemTable<T> {
    fn insert(&self, mut record: T) -> Result<T, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        record.set_raw_id(id);
        let mut rows = self.rows.lock().expect("table mutex poisoned");
        rows.insert(id, record.clone());
        Ok(record)
    }

    fn save(&self, record: T) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().expect("table mutex poisoned");
        if !rows.contains_key(&record.raw_id()) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(record.raw_id(), record);
        Ok(())
    }

    fn find(&self, raw: u32) -> Result<Option<T>, RepositoryError> {
        let rows = self.rows.lock().expect("table mutex poisoned");
        Ok(rows.get(&raw).cloned())
    }

    fn find_where(&self, matches: impl Fn(&T) -> bool) -> Result<Vec<T>, RepositoryError> {
        let rows = self.rows.lock().expect("table mutex poisoned");
        Ok(rows.values().filter(|row| matches(row)).cloned().collect())
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        let rows = self.rows.lock().expect("table mutex poisoned");
        Ok(rows.values().cloned().collect())
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().expect("table mutex poisoned");
        rows.clear();
        Ok(())
    }
}

/// Mutex-per-table store backing the service in the binary and in tests.
#[derive(Default)]
pub struct MemoryStore {
    persons: MemTable<Person>,
    institutions: MemTable<Institution>,
    courses: MemTable<Course>,
    wages: MemTable<Wage>,
    time_slots: MemTable<TimeSlot>,
    rooms: MemTable<Room>,
    requests: MemTable<Request>,
    notifications: MemTable<Notification>,
    reviews: MemTable<Review>,
    applications: MemTable<Application>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonRepository for MemoryStore {
    fn insert_person(&self, person: Person) -> Result<Person, RepositoryError> {
        self.persons.insert(person)
    }

    fn save_person(&self, person: Person) -> Result<(), RepositoryError> {
        self.persons.save(person)
    }

    fn person_by_id(&self, id: PersonId) -> Result<Option<Person>, RepositoryError> {
        self.persons.find(id.0)
    }

    fn person_by_email(
        &self,
        role: PersonRole,
        email: &str,
    ) -> Result<Option<Person>, RepositoryError> {
        Ok(self
            .persons
            .find_where(|person| person.role == role && person.email == email)?
            .into_iter()
            .next())
    }

    fn persons_with_role(&self, role: PersonRole) -> Result<Vec<Person>, RepositoryError> {
        self.persons.find_where(|person| person.role == role)
    }

    fn clear_persons(&self) -> Result<(), RepositoryError> {
        self.persons.clear()
    }
}

impl InstitutionRepository for MemoryStore {
    fn insert_institution(
        &self,
        institution: Institution,
    ) -> Result<Institution, RepositoryError> {
        self.institutions.insert(institution)
    }

    fn save_institution(&self, institution: Institution) -> Result<(), RepositoryError> {
        self.institutions.save(institution)
    }

    fn institution_by_id(
        &self,
        id: InstitutionId,
    ) -> Result<Option<Institution>, RepositoryError> {
        self.institutions.find(id.0)
    }

    fn all_institutions(&self) -> Result<Vec<Institution>, RepositoryError> {
        self.institutions.all()
    }

    fn clear_institutions(&self) -> Result<(), RepositoryError> {
        self.institutions.clear()
    }
}

impl CourseRepository for MemoryStore {
    fn insert_course(&self, course: Course) -> Result<Course, RepositoryError> {
        self.courses.insert(course)
    }

    fn save_course(&self, course: Course) -> Result<(), RepositoryError> {
        self.courses.save(course)
    }

    fn course_by_id(&self, id: CourseId) -> Result<Option<Course>, RepositoryError> {
        self.courses.find(id.0)
    }

    fn all_courses(&self) -> Result<Vec<Course>, RepositoryError> {
        self.courses.all()
    }

    fn clear_courses(&self) -> Result<(), RepositoryError> {
        self.courses.clear()
    }
}

impl WageRepository for MemoryStore {
    fn insert_wage(&self, wage: Wage) -> Result<Wage, RepositoryError> {
        self.wages.insert(wage)
    }

    fn save_wage(&self, wage: Wage) -> Result<(), RepositoryError> {
        self.wages.save(wage)
    }

    fn wage_by_id(&self, id: WageId) -> Result<Option<Wage>, RepositoryError> {
        self.wages.find(id.0)
    }

    fn all_wages(&self) -> Result<Vec<Wage>, RepositoryError> {
        self.wages.all()
    }

    fn clear_wages(&self) -> Result<(), RepositoryError> {
        self.wages.clear()
    }
}

impl TimeSlotRepository for MemoryStore {
    fn insert_time_slot(&self, slot: TimeSlot) -> Result<TimeSlot, RepositoryError> {
        self.time_slots.insert(slot)
    }

    fn save_time_slot(&self, slot: TimeSlot) -> Result<(), RepositoryError> {
        self.time_slots.save(slot)
    }

    fn time_slot_by_id(&self, id: TimeSlotId) -> Result<Option<TimeSlot>, RepositoryError> {
        self.time_slots.find(id.0)
    }

    fn time_slots_at(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Vec<TimeSlot>, RepositoryError> {
        self.time_slots
            .find_where(|slot| slot.date == date && slot.time == time)
    }

    fn all_time_slots(&self) -> Result<Vec<TimeSlot>, RepositoryError> {
        self.time_slots.all()
    }

    fn clear_time_slots(&self) -> Result<(), RepositoryError> {
        self.time_slots.clear()
    }
}

impl RoomRepository for MemoryStore {
    fn insert_room(&self, room: Room) -> Result<Room, RepositoryError> {
        self.rooms.insert(room)
    }

    fn save_room(&self, room: Room) -> Result<(), RepositoryError> {
        self.rooms.save(room)
    }

    fn room_by_id(&self, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        self.rooms.find(id.0)
    }

    fn all_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        self.rooms.all()
    }

    fn clear_rooms(&self) -> Result<(), RepositoryError> {
        self.rooms.clear()
    }
}

impl RequestRepository for MemoryStore {
    fn insert_request(&self, request: Request) -> Result<Request, RepositoryError> {
        self.requests.insert(request)
    }

    fn save_request(&self, request: Request) -> Result<(), RepositoryError> {
        self.requests.save(request)
    }

    fn request_by_id(&self, id: RequestId) -> Result<Option<Request>, RepositoryError> {
        self.requests.find(id.0)
    }

    fn all_requests(&self) -> Result<Vec<Request>, RepositoryError> {
        self.requests.all()
    }

    fn clear_requests(&self) -> Result<(), RepositoryError> {
        self.requests.clear()
    }
}

impl NotificationRepository for MemoryStore {
    fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, RepositoryError> {
        self.notifications.insert(notification)
    }

    fn save_notification(&self, notification: Notification) -> Result<(), RepositoryError> {
        self.notifications.save(notification)
    }

    fn notification_by_id(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        self.notifications.find(id.0)
    }

    fn notification_for_request(
        &self,
        request: RequestId,
    ) -> Result<Option<Notification>, RepositoryError> {
        Ok(self
            .notifications
            .find_where(|notification| notification.request == request)?
            .into_iter()
            .next())
    }

    fn all_notifications(&self) -> Result<Vec<Notification>, RepositoryError> {
        self.notifications.all()
    }

    fn clear_notifications(&self) -> Result<(), RepositoryError> {
        self.notifications.clear()
    }
}

impl ReviewRepository for MemoryStore {
    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError> {
        self.reviews.insert(review)
    }

    fn save_review(&self, review: Review) -> Result<(), RepositoryError> {
        self.reviews.save(review)
    }

    fn review_by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        self.reviews.find(id.0)
    }

    fn all_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        self.reviews.all()
    }

    fn clear_reviews(&self) -> Result<(), RepositoryError> {
        self.reviews.clear()
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        self.applications.insert(application)
    }

    fn save_application(&self, application: Application) -> Result<(), RepositoryError> {
        self.applications.save(application)
    }

    fn application_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        self.applications.find(id.0)
    }

    fn application_by_email(&self, email: &str) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .applications
            .find_where(|application| application.email == email)?
            .into_iter()
            .next())
    }

    fn all_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        self.applications.all()
    }

    fn clear_applications(&self) -> Result<(), RepositoryError> {
        self.applications.clear()
    }
}
