use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

use tutor_hub::config::AppConfig;
use tutor_hub::error::AppError;
use tutor_hub::telemetry;
use tutor_hub::tutoring::{
    tutoring_router, views, ApplicationCsvImporter, CourseDraft, InstitutionDraft, MemoryStore,
    PersonDraft, RequestDraft, ReviewDraft, RoomDraft, SchoolLevel, ServiceError, TimeSlotDraft,
    TutoringService, WageDraft,
};

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Tutoring Session Coordinator",
    about = "Run the tutoring session matching service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a complete match end to end against an in-memory store
    Demo,
    /// Tutor application management
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Import tutor applications from a CSV export
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Path to the CSV export (Name, Email, Courses, Existing User)
    #[arg(long)]
    csv: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo => run_demo(),
        Command::Applications {
            command: ApplicationsCommand::Import(args),
        } => run_import(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(TutoringService::new(store));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let ops = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = tutoring_router(service).merge(ops).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tutoring session coordinator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::new());
    let service = TutoringService::new(store);

    let summary = ApplicationCsvImporter::from_path(&args.csv, &service)?;

    println!("Imported {} application(s)", summary.accepted.len());
    for application in &summary.accepted {
        println!(
            "- #{} {} <{}> ({})",
            application.id,
            application.name,
            application.email,
            if application.is_existing_user {
                "existing user"
            } else {
                "new user"
            }
        );
    }

    if summary.rejected.is_empty() {
        println!("Rejected rows: none");
    } else {
        println!("Rejected rows:");
        for row in &summary.rejected {
            println!("- line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}

fn run_demo() -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::new());
    let service = TutoringService::new(store);

    let institution = service.create_institution(InstitutionDraft {
        name: Some("McGill University".to_string()),
        level: Some(SchoolLevel::University),
    })?;
    let course = service.create_course(CourseDraft {
        name: Some("MATH 263".to_string()),
        subject: Some("Mathematics".to_string()),
        institution: Some(institution.id),
    })?;

    let tutor = service.create_tutor(PersonDraft {
        name: Some("Martin".to_string()),
        email: Some("martin@mail.example.ca".to_string()),
        password: Some("password".to_string()),
    })?;
    let student = service.create_student(PersonDraft {
        name: Some("Jason".to_string()),
        email: Some("jason@mail.example.ca".to_string()),
        password: Some("password".to_string()),
    })?;
    service.create_manager(PersonDraft {
        name: Some("Marwan".to_string()),
        email: Some("marwan@mail.example.ca".to_string()),
        password: Some("password".to_string()),
    })?;

    service.create_wage(WageDraft {
        tutor: Some(tutor.id),
        course: Some(course.id),
        hourly_rate: Some(20),
    })?;
    let date = NaiveDate::from_ymd_opt(2026, 9, 22).expect("valid demo date");
    let time = NaiveTime::from_hms_opt(8, 0, 0).expect("valid demo time");
    service.create_time_slot(TimeSlotDraft {
        tutor: Some(tutor.id),
        date: Some(date),
        time: Some(time),
    })?;

    let room = service.create_room(RoomDraft {
        number: Some(12),
        capacity: Some(30),
    })?;
    let request = service.create_request(RequestDraft {
        time: Some(time),
        date: Some(date),
        tutor: Some(tutor.id),
        student: Some(student.id),
        course: Some(course.id),
    })?;
    service.assign_room(request.id, room.id)?;
    service.accept_request(request.id)?;
    service.create_review(ReviewDraft {
        rating: Some(5),
        comment: Some("Great session.".to_string()),
        author: Some(student.id),
        recipient: Some(tutor.id),
    })?;

    println!("Tutoring match demo");
    println!(
        "Catalogue: {} ({}) offering {}",
        institution.name,
        institution.level.label(),
        course.name
    );

    let detail = service
        .request_detail(request.id)?
        .ok_or(ServiceError::MissingEntity("Request"))?;
    println!(
        "\nRequest #{}: {} with {} on {} at {} -> {}",
        detail.request.id,
        detail.student.name,
        detail.tutor.name,
        detail.request.date,
        detail.request.time,
        detail.status().label()
    );
    if let Some(room) = &detail.room {
        println!("Room {} (capacity {})", room.number, room.capacity);
    }

    let profile = service
        .tutor_profile(&tutor.email)?
        .ok_or(ServiceError::MissingEntity("Tutor"))?;
    let profile = views::tutor_profile_view(Some(&profile))?;
    println!("\nTutor {} <{}>", profile.name, profile.email);
    println!("- {} time slot(s) published", profile.time_slots.len());
    for wage in &profile.wages {
        println!("- charges ${}/h for course #{}", wage.hourly_rate, wage.course);
    }
    for request in &profile.requests {
        println!(
            "- request #{} on {}: {}",
            request.id,
            request.date,
            request.status.label()
        );
    }

    let rejected = service.create_request(RequestDraft {
        time: None,
        date: Some(date),
        tutor: Some(tutor.id),
        student: Some(student.id),
        course: Some(course.id),
    });
    if let Err(err) = rejected {
        println!("\nValidation sample: {err}");
    }

    Ok(())
}
