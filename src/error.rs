use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::tutoring::{IntakeError, ServiceError, ViewError};

/// Top-level failure for the command-line entry points.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("import error: {0}")]
    Intake(#[from] IntakeError),
    #[error("mapping error: {0}")]
    View(#[from] ViewError),
}
