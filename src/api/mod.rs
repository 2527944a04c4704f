mod prompt;
mod report;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    PersonItems, Result, SplitError, SplitInputs, check_people_count, split_bill,
};
use crate::logging;

pub use prompt::{FlagSource, ItemSource, LayeredSource, PromptSource, collect_items};
pub use report::{render_json, render_text};

#[derive(Parser, Debug)]
#[command(
    name = "splitwiser",
    about = "Split a shared bill, spreading tax and common costs in proportion to what each person had",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub split: SplitArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the split calculation as a JSON HTTP API
    Serve {
        #[arg(default_value_t = 8080, help = "Port to listen on")]
        port: u16,
    },
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[arg(short, long, help = "Total amount of the bill, tax included")]
    total: Option<f64>,
    #[arg(short, long, help = "Subtotal of the bill before tax")]
    subtotal: Option<f64>,
    #[arg(short, long, help = "Number of people involved in the transaction")]
    people: Option<usize>,
    #[arg(short, long, help = "Whether people have bought individual items")]
    individual: bool,
    #[arg(
        short,
        long,
        help = "Whether some items are excluded from individual people"
    )]
    exclude: bool,
    #[arg(
        long = "items",
        value_name = "PRICES",
        requires = "individual",
        allow_hyphen_values = true,
        help = "Space separated individual item prices; repeat once per person instead of answering prompts"
    )]
    items: Vec<String>,
    #[arg(
        long = "excluded-items",
        value_name = "PRICES",
        requires = "exclude",
        allow_hyphen_values = true,
        help = "Space separated prices of items excluded from a person; repeat once per person"
    )]
    excluded_items: Vec<String>,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
    #[arg(short, long, help = "Log each step of the calculation to stderr")]
    verbose: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SplitPayload {
    total: Option<f64>,
    subtotal: Option<f64>,
    people: Option<usize>,
    individual_items: Option<Vec<Vec<f64>>>,
    excluded_items: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EqualSplitQuery {
    total: Option<f64>,
    subtotal: Option<f64>,
    people: Option<usize>,
}

impl From<EqualSplitQuery> for SplitPayload {
    fn from(value: EqualSplitQuery) -> Self {
        SplitPayload {
            total: value.total,
            subtotal: value.subtotal,
            people: value.people,
            ..SplitPayload::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Gathers any missing values from stdin and prints the report.
pub fn run_cli(args: SplitArgs) -> Result<()> {
    logging::init_cli_logger(args.verbose);
    debug!(?args, "parsed command line");

    let json = args.json;
    let prompter = PromptSource::new(io::stdin().lock(), io::stderr());
    let inputs = build_inputs(args, prompter)?;
    let report = split_bill(&inputs)?;

    let rendered = if json {
        let mut out = render_json(&report)?;
        out.push('\n');
        out
    } else {
        render_text(&report)
    };
    io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}

fn build_inputs<R: BufRead, W: Write>(
    args: SplitArgs,
    mut prompter: PromptSource<R, W>,
) -> Result<SplitInputs> {
    let total = match args.total {
        Some(total) => total,
        None => prompter.ask_total()?,
    };
    let subtotal = match args.subtotal {
        Some(subtotal) => subtotal,
        None => prompter.ask_subtotal()?,
    };
    let people_count = match args.people {
        Some(people) => people,
        None => prompter.ask_people()?,
    };

    check_people_count(people_count)
        .map_err(|e| SplitError::config(format!("--people: {}", config_message(e))))?;
    if !total.is_finite() {
        return Err(SplitError::config("--total must be a finite number"));
    }
    if !subtotal.is_finite() {
        return Err(SplitError::config("--subtotal must be a finite number"));
    }

    let flags = FlagSource::new(&args.items, &args.excluded_items, people_count)?;
    let mut source = LayeredSource::new(flags, prompter);
    let items = collect_items(&mut source, people_count, args.individual, args.exclude)?;

    Ok(SplitInputs {
        total,
        subtotal,
        people_count,
        individual_mode: args.individual,
        exclude_mode: args.exclude,
        items,
    })
}

fn config_message(err: SplitError) -> String {
    match err {
        SplitError::Configuration(message) => message,
        other => other.to_string(),
    }
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/split",
            get(split_get_handler).post(split_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    logging::init_server_logger();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("splitwiser HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/split");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn split_get_handler(
    query: std::result::Result<Query<EqualSplitQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => split_handler_impl(query.into()).await,
        Err(rejection) => rejected_request(&rejection.body_text()),
    }
}

async fn split_post_handler(
    payload: std::result::Result<Json<SplitPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => split_handler_impl(payload).await,
        Err(rejection) => rejected_request(&rejection.body_text()),
    }
}

fn rejected_request(msg: &str) -> Response {
    warn!(error = msg, "malformed split request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

async fn split_handler_impl(payload: SplitPayload) -> Response {
    match split_request_from_payload(payload).and_then(|inputs| split_bill(&inputs)) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => {
            warn!(error = %err, "rejected split request");
            error_response(status_for(&err), &err.to_string())
        }
    }
}

fn status_for(err: &SplitError) -> StatusCode {
    match err {
        SplitError::DivisionByZero(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SplitError::InputParse { .. } | SplitError::Configuration(_) => StatusCode::BAD_REQUEST,
        SplitError::Io(_) | SplitError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn split_request_from_json(json: &str) -> Result<SplitInputs> {
    let payload = serde_json::from_str::<SplitPayload>(json)
        .map_err(|e| SplitError::config(format!("Invalid API JSON payload: {e}")))?;
    split_request_from_payload(payload)
}

fn split_request_from_payload(payload: SplitPayload) -> Result<SplitInputs> {
    let Some(total) = payload.total else {
        return Err(SplitError::config("total is required"));
    };
    let Some(subtotal) = payload.subtotal else {
        return Err(SplitError::config("subtotal is required"));
    };
    let Some(people_count) = payload.people else {
        return Err(SplitError::config("people is required"));
    };
    check_people_count(people_count)?;

    let individual_mode = payload.individual_items.is_some();
    let exclude_mode = payload.excluded_items.is_some();
    let items = if individual_mode || exclude_mode {
        let individual =
            payload_lists(payload.individual_items, people_count, "individualItems")?;
        let excluded = payload_lists(payload.excluded_items, people_count, "excludedItems")?;
        individual
            .into_iter()
            .zip(excluded)
            .map(|(individual, excluded)| PersonItems {
                individual,
                excluded,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(SplitInputs {
        total,
        subtotal,
        people_count,
        individual_mode,
        exclude_mode,
        items,
    })
}

/// Expects `people_count` to be checked already.
fn payload_lists(
    lists: Option<Vec<Vec<f64>>>,
    people_count: usize,
    field: &str,
) -> Result<Vec<Vec<f64>>> {
    match lists {
        None => Ok(vec![Vec::new(); people_count]),
        Some(lists) if lists.len() == people_count => Ok(lists),
        Some(lists) => Err(SplitError::config(format!(
            "{field} has {} entries but there are {people_count} people",
            lists.len()
        ))),
    }
}
