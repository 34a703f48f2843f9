use chrono::{NaiveDate, NaiveTime};

use crate::tutoring::domain::{
    ApplicationDraft, CourseDraft, InstitutionDraft, InstitutionId, NotificationDraft,
    PersonDraft, PersonId, PersonRole, RequestDraft, ReviewDraft, RoomDraft, SchoolLevel,
    TimeSlotDraft, WageDraft,
};
use crate::tutoring::validation::{self, ValidationError};

fn message(error: ValidationError) -> String {
    error.to_string()
}

#[test]
fn person_rules_name_each_role_in_the_message() {
    for (role, expected) in [
        (
            PersonRole::Tutor,
            "Tutor name, email or password cannot be empty!",
        ),
        (
            PersonRole::Student,
            "Student name, email or password cannot be empty!",
        ),
        (
            PersonRole::Manager,
            "Manager name, email or password cannot be empty!",
        ),
    ] {
        let error = validation::person(
            role,
            PersonDraft {
                name: None,
                email: None,
                password: Some("password".to_string()),
            },
        )
        .expect_err("missing fields rejected");
        assert_eq!(message(error), expected);
    }
}

#[test]
fn person_rules_treat_blank_fields_as_missing() {
    let error = validation::person(
        PersonRole::Tutor,
        PersonDraft {
            name: Some(String::new()),
            email: Some("martin@mail.example.ca".to_string()),
            password: Some("password".to_string()),
        },
    )
    .expect_err("blank name rejected");
    assert_eq!(message(error), "Tutor name, email or password cannot be empty!");
}

#[test]
fn person_rules_accept_complete_drafts() {
    let person = validation::person(
        PersonRole::Student,
        PersonDraft {
            name: Some("Jason".to_string()),
            email: Some("jason@mail.example.ca".to_string()),
            password: Some("password".to_string()),
        },
    )
    .expect("complete draft accepted");
    assert_eq!(person.role, PersonRole::Student);
    assert_eq!(person.name, "Jason");
}

#[test]
fn course_requires_a_name_before_anything_else() {
    let error = validation::course(CourseDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "Course name cannot be empty!");

    let error = validation::course(CourseDraft {
        name: Some("MATH 263".to_string()),
        subject: None,
        institution: None,
    })
    .expect_err("missing institution rejected");
    assert_eq!(message(error), "An institution needs to be specified!");
}

#[test]
fn institution_requires_a_name() {
    let error = validation::institution(InstitutionDraft {
        name: None,
        level: Some(SchoolLevel::University),
    })
    .expect_err("missing name rejected");
    assert_eq!(message(error), "Institution name cannot be null!");

    let error = validation::institution(InstitutionDraft {
        name: Some("McGill University".to_string()),
        level: None,
    })
    .expect_err("missing level rejected");
    assert_eq!(message(error), "A school level needs to be specified!");
}

#[test]
fn room_checks_number_then_capacity() {
    let error = validation::room(RoomDraft {
        number: None,
        capacity: Some(30),
    })
    .expect_err("missing number rejected");
    assert_eq!(message(error), "Room number cannot be empty!");

    let error = validation::room(RoomDraft {
        number: Some(12),
        capacity: None,
    })
    .expect_err("missing capacity rejected");
    assert_eq!(message(error), "Room capacity cannot be empty!");
}

#[test]
fn request_reports_missing_time_first() {
    // every field absent: the time rule must win
    let error = validation::request(RequestDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "Time cannot be empty!");
}

#[test]
fn request_walks_the_field_order() {
    let time = NaiveTime::from_hms_opt(8, 0, 1).expect("valid time");
    let date = NaiveDate::from_ymd_opt(2026, 9, 22).expect("valid date");

    let error = validation::request(RequestDraft {
        time: Some(time),
        ..RequestDraft::default()
    })
    .expect_err("missing date rejected");
    assert_eq!(message(error), "Date cannot be empty!");

    let error = validation::request(RequestDraft {
        time: Some(time),
        date: Some(date),
        ..RequestDraft::default()
    })
    .expect_err("missing tutor rejected");
    assert_eq!(message(error), "A tutor needs to be specified!");

    let error = validation::request(RequestDraft {
        time: Some(time),
        date: Some(date),
        tutor: Some(PersonId(1)),
        ..RequestDraft::default()
    })
    .expect_err("missing student rejected");
    assert_eq!(message(error), "A student needs to be specified!");

    let error = validation::request(RequestDraft {
        time: Some(time),
        date: Some(date),
        tutor: Some(PersonId(1)),
        student: Some(PersonId(2)),
        course: None,
    })
    .expect_err("missing course rejected");
    assert_eq!(message(error), "A course needs to be specified!");
}

#[test]
fn notification_requires_a_backing_request() {
    let error =
        validation::notification(NotificationDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "Notification ID cannot be null!");
}

#[test]
fn review_checks_rating_before_everything() {
    let error = validation::review(ReviewDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "Rating cannot be null!");

    let error = validation::review(ReviewDraft {
        rating: Some(5),
        ..ReviewDraft::default()
    })
    .expect_err("missing author rejected");
    assert_eq!(message(error), "A review author needs to be specified!");

    let error = validation::review(ReviewDraft {
        rating: Some(5),
        author: Some(PersonId(1)),
        ..ReviewDraft::default()
    })
    .expect_err("missing recipient rejected");
    assert_eq!(message(error), "A review recipient needs to be specified!");
}

#[test]
fn review_comment_stays_optional() {
    let review = validation::review(ReviewDraft {
        rating: Some(4),
        comment: None,
        author: Some(PersonId(1)),
        recipient: Some(PersonId(2)),
    })
    .expect("comment-free review accepted");
    assert_eq!(review.comment, None);
}

#[test]
fn application_checks_name_then_email() {
    let error =
        validation::application(ApplicationDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "Application name cannot be empty!");

    let error = validation::application(ApplicationDraft {
        name: Some("Martin".to_string()),
        ..ApplicationDraft::default()
    })
    .expect_err("missing email rejected");
    assert_eq!(message(error), "Application email cannot be empty!");
}

#[test]
fn wage_checks_tutor_then_course_then_rate() {
    let error = validation::wage(WageDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "A tutor needs to be specified!");

    let error = validation::wage(WageDraft {
        tutor: Some(PersonId(1)),
        ..WageDraft::default()
    })
    .expect_err("missing course rejected");
    assert_eq!(message(error), "A course needs to be specified!");

    let error = validation::wage(WageDraft {
        tutor: Some(PersonId(1)),
        course: Some(crate::tutoring::domain::CourseId(1)),
        hourly_rate: None,
    })
    .expect_err("missing rate rejected");
    assert_eq!(message(error), "An hourly rate needs to be specified!");
}

#[test]
fn time_slot_requires_its_tutor_first() {
    let error = validation::time_slot(TimeSlotDraft::default()).expect_err("empty draft rejected");
    assert_eq!(message(error), "A tutor needs to be specified!");
}

#[test]
fn course_draft_without_subject_stores_an_empty_subject() {
    let course = validation::course(CourseDraft {
        name: Some("MATH 263".to_string()),
        subject: None,
        institution: Some(InstitutionId(1)),
    })
    .expect("course accepted");
    assert_eq!(course.subject, "");
}
