use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voting_registry::*;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use serde::Deserialize;
use serde_json::json;
use serde_json::Value as JSValue;

use crate::args::Args;
use crate::booth::config_reader::{load_settings, Settings};
use crate::booth::roll::load_roll;

pub mod config_reader;
pub mod pages;
pub mod roll;

#[derive(Debug, Snafu)]
pub enum BoothError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error reading CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("CSV line {lineno}: invalid voter id {value:?}"))]
    CsvInvalidId { lineno: usize, value: String },
    #[snafu(display("Unknown roll provider {provider:?}: expected json or csv"))]
    UnknownProvider { provider: String },

    #[snafu(display("Could not seed the registry: {source}"))]
    Seeding { source: RegistryError },

    #[snafu(display("Could not listen on {address}"))]
    Bind {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Server error"))]
    Serve { source: std::io::Error },

    #[snafu(display("The registry is unavailable"))]
    RegistryLock {},
    #[snafu(display("Missing field {field}"))]
    MissingField { field: String },
    #[snafu(display("Invalid value {value:?} for field {field}: expected a voter id"))]
    InvalidField { field: String, value: String },
}

pub type BoothResult<T> = Result<T, BoothError>;

impl IntoResponse for BoothError {
    fn into_response(self) -> Response {
        let status = match self {
            BoothError::MissingField { .. } | BoothError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("Request failed ({}): {}", status, self);
        (status, Html(pages::error(&self.to_string()))).into_response()
    }
}

/// The registry, shared between all the requests.
///
/// Each request holds the lock for the whole operation, so the checks and the
/// mutation of an operation cannot interleave with another request.
pub type SharedRegistry = Arc<Mutex<VotingSystem>>;

pub fn shared(system: VotingSystem) -> SharedRegistry {
    Arc::new(Mutex::new(system))
}

fn lock(registry: &SharedRegistry) -> BoothResult<MutexGuard<'_, VotingSystem>> {
    registry.lock().ok().context(RegistryLockSnafu {})
}

fn require(field: &str, value: Option<String>) -> BoothResult<String> {
    value.context(MissingFieldSnafu { field })
}

fn parse_id(field: &str, value: Option<String>) -> BoothResult<VoterId> {
    let s = require(field, value)?;
    s.trim()
        .parse::<VoterId>()
        .ok()
        .context(InvalidFieldSnafu { field, value: s.clone() })
}

/// The message displayed after an operation, whether it was accepted or not.
fn status_message(res: Result<Receipt, RegistryError>) -> String {
    match res {
        Ok(receipt) => receipt.to_string(),
        Err(e) => {
            info!("Rejected: {}", e);
            e.to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoterForm {
    voter_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateForm {
    candidate_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BallotForm {
    voter_id: Option<String>,
    candidate_id: Option<String>,
}

async fn index() -> Html<String> {
    Html(pages::index())
}

async fn register_voter_form() -> Html<String> {
    Html(pages::register_voter(None))
}

async fn register_voter(
    State(registry): State<SharedRegistry>,
    Form(form): Form<VoterForm>,
) -> BoothResult<Html<String>> {
    debug!("register_voter: {:?}", form);
    let voter_id = parse_id("voter_id", form.voter_id)?;
    let name = require("name", form.name)?;
    let message = status_message(lock(&registry)?.register_voter(voter_id, &name));
    Ok(Html(pages::register_voter(Some(&message))))
}

async fn register_candidate_form() -> Html<String> {
    Html(pages::register_candidate(None))
}

async fn register_candidate(
    State(registry): State<SharedRegistry>,
    Form(form): Form<CandidateForm>,
) -> BoothResult<Html<String>> {
    debug!("register_candidate: {:?}", form);
    let candidate_id = parse_id("candidate_id", form.candidate_id)?;
    let name = require("name", form.name)?;
    let message = status_message(lock(&registry)?.register_candidate(candidate_id, &name));
    Ok(Html(pages::register_candidate(Some(&message))))
}

async fn cast_vote_form(State(registry): State<SharedRegistry>) -> BoothResult<Html<String>> {
    let candidates: Vec<Candidate> = lock(&registry)?.candidates().cloned().collect();
    Ok(Html(pages::cast_vote(None, &candidates)))
}

async fn cast_vote(
    State(registry): State<SharedRegistry>,
    Form(form): Form<BallotForm>,
) -> BoothResult<Html<String>> {
    debug!("cast_vote: {:?}", form);
    let voter_id = parse_id("voter_id", form.voter_id)?;
    let candidate_id = parse_id("candidate_id", form.candidate_id)?;
    let (message, candidates) = {
        let mut system = lock(&registry)?;
        let message = status_message(system.cast_vote(voter_id, candidate_id));
        let candidates: Vec<Candidate> = system.candidates().cloned().collect();
        (message, candidates)
    };
    Ok(Html(pages::cast_vote(Some(&message), &candidates)))
}

async fn results(State(registry): State<SharedRegistry>) -> BoothResult<Html<String>> {
    let results = lock(&registry)?.display_results();
    Ok(Html(pages::results(&results)))
}

async fn logs(State(registry): State<SharedRegistry>) -> BoothResult<Html<String>> {
    let logs = lock(&registry)?.display_logs().to_vec();
    Ok(Html(pages::logs(&logs)))
}

fn results_to_json(system: &VotingSystem) -> JSValue {
    let results: Vec<JSValue> = system
        .candidates()
        .map(|c| json!({"candidateId": c.candidate_id, "name": c.name, "votes": c.votes}))
        .collect();
    json!({ "results": results })
}

fn logs_to_json(logs: &[VoteLogEntry]) -> JSValue {
    let l: Vec<String> = logs.iter().map(|e| e.to_string()).collect();
    json!({ "logs": l })
}

async fn api_results(State(registry): State<SharedRegistry>) -> BoothResult<Json<JSValue>> {
    let js = results_to_json(&*lock(&registry)?);
    Ok(Json(js))
}

async fn api_logs(State(registry): State<SharedRegistry>) -> BoothResult<Json<JSValue>> {
    let js = logs_to_json(lock(&registry)?.display_logs());
    Ok(Json(js))
}

pub fn router(registry: SharedRegistry) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/register_voter",
            get(register_voter_form).post(register_voter),
        )
        .route(
            "/register_candidate",
            get(register_candidate_form).post(register_candidate),
        )
        .route("/cast_vote", get(cast_vote_form).post(cast_vote))
        .route("/results", get(results))
        .route("/logs", get(logs))
        .route("/api/results", get(api_results))
        .route("/api/logs", get(api_logs))
        .with_state(registry)
}

pub async fn serve(settings: &Settings, registry: SharedRegistry) -> BoothResult<()> {
    let address = settings.bind.as_str();
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context(BindSnafu { address })?;
    info!("Listening on http://{}", address);
    axum::serve(listener, router(registry))
        .await
        .context(ServeSnafu {})
}

/// Loads the settings and the roll, seeds the registry and serves it until the process stops.
pub async fn run_booth(args: &Args) -> BoothResult<()> {
    let settings = load_settings(args)?;
    debug!("settings: {:?}", settings);
    let roll = load_roll(&settings)?;
    let system = roll.seed()?;
    serve(&settings, shared(system)).await
}
