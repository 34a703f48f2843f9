//! Bulk tutor-application intake from a CSV export.
//!
//! Each row becomes an application draft and runs through the same service
//! validation as an interactive submission. Rows that break a rule are
//! collected with the rule's message instead of aborting the import; only
//! unreadable input or a store failure stops the run.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{Application, ApplicationDraft};
use super::repository::TutoringStore;
use super::service::{ServiceError, TutoringService};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read application export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid application CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not store imported application: {0}")]
    Service(ServiceError),
}

/// Outcome of one import run.
#[derive(Debug, Default)]
pub struct IntakeSummary {
    pub accepted: Vec<Application>,
    pub rejected: Vec<RejectedRow>,
}

/// A row the validation rules turned away, with the exact rule message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Courses", default, deserialize_with = "empty_string_as_none")]
    courses: Option<String>,
    #[serde(
        rename = "Existing User",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    existing_user: Option<String>,
}

impl ApplicationRow {
    fn draft(self) -> ApplicationDraft {
        let is_existing_user = self
            .existing_user
            .as_deref()
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1"));

        ApplicationDraft {
            is_existing_user,
            name: self.name,
            email: self.email,
            courses: self.courses,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub struct ApplicationCsvImporter;

impl ApplicationCsvImporter {
    pub fn from_path<P, S>(
        path: P,
        service: &TutoringService<S>,
    ) -> Result<IntakeSummary, IntakeError>
    where
        P: AsRef<Path>,
        S: TutoringStore,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, service)
    }

    pub fn from_reader<R, S>(
        reader: R,
        service: &TutoringService<S>,
    ) -> Result<IntakeSummary, IntakeError>
    where
        R: Read,
        S: TutoringStore,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut summary = IntakeSummary::default();

        for (index, row) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
            // header occupies line 1, first record sits on line 2
            let line = index + 2;
            let draft = row?.draft();

            match service.create_application(draft) {
                Ok(application) => summary.accepted.push(application),
                Err(ServiceError::Validation(violation)) => summary.rejected.push(RejectedRow {
                    line,
                    reason: violation.to_string(),
                }),
                Err(other) => return Err(IntakeError::Service(other)),
            }
        }

        info!(
            accepted = summary.accepted.len(),
            rejected = summary.rejected.len(),
            "application import finished"
        );
        Ok(summary)
    }
}
