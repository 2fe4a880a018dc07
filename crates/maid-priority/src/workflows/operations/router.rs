use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::{Destinations, MergeInput, OperationsError, PriorityOperationsService};
use crate::workflows::distribution::SheetWriter;
use crate::workflows::intake;
use crate::workflows::ledger::MergeOutcome;
use crate::workflows::priorities::{ReportKind, ReportStatistics};

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub workers_csv: String,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SheetView {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub sheets: Vec<SheetView>,
    pub statistics: ReportStatistics,
}

#[derive(Debug, Deserialize)]
pub struct BreakdownRequest {
    pub prioritized_csv: String,
}

#[derive(Debug, Deserialize)]
pub struct QuotaRequest {
    pub prioritized_csv: String,
    #[serde(default)]
    pub destinations: Destinations,
}

#[derive(Debug, Deserialize)]
pub struct ReplacementRequest {
    pub prioritized_csv: String,
    pub pool_csv: String,
    #[serde(default)]
    pub destinations: Destinations,
}

/// Links either as a CSV with a `Login link` column or as pasted lines.
#[derive(Debug, Deserialize)]
pub struct LinksRequest {
    #[serde(default)]
    pub links_csv: Option<String>,
    #[serde(default)]
    pub links_text: Option<String>,
    #[serde(default)]
    pub destinations: Destinations,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub outcome: MergeOutcome,
    pub accepted_rows: usize,
    pub rejected_rows: usize,
}

/// Router exposing the report, breakdown, distribution, and merge endpoints.
pub fn operations_router<W>(service: Arc<PriorityOperationsService<W>>) -> Router
where
    W: SheetWriter + 'static,
{
    Router::new()
        .route("/api/v1/priorities/report", post(report_handler::<W>))
        .route("/api/v1/priorities/breakdown", post(breakdown_handler::<W>))
        .route("/api/v1/distribution/quota", post(quota_handler::<W>))
        .route(
            "/api/v1/distribution/replacement",
            post(replacement_handler::<W>),
        )
        .route("/api/v1/distribution/links", post(links_handler::<W>))
        .route("/api/v1/ledger/merge", post(merge_handler::<W>))
        .with_state(service)
}

pub(crate) async fn report_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<ReportRequest>,
) -> Response
where
    W: SheetWriter + 'static,
{
    let kind = match request.kind.as_deref() {
        None => ReportKind::Combined,
        Some(raw) => match ReportKind::parse(raw) {
            Some(kind) => kind,
            None => {
                let payload = json!({
                    "error": format!("unknown report kind '{raw}'"),
                });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        },
    };

    match service.report(&request.workers_csv, kind) {
        Ok(report) => {
            let sheets = report
                .sheets
                .iter()
                .map(|sheet| SheetView {
                    name: sheet.name.clone(),
                    rows: sheet.records.len(),
                })
                .collect();
            let body = ReportResponse {
                kind: report.kind,
                sheets,
                statistics: report.statistics,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn breakdown_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<BreakdownRequest>,
) -> Response
where
    W: SheetWriter + 'static,
{
    match service.breakdown(&request.prioritized_csv) {
        Ok(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quota_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<QuotaRequest>,
) -> Response
where
    W: SheetWriter + 'static,
{
    match service.quota(&request.prioritized_csv, &request.destinations) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn replacement_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<ReplacementRequest>,
) -> Response
where
    W: SheetWriter + 'static,
{
    match service.replacement(
        &request.prioritized_csv,
        &request.pool_csv,
        &request.destinations,
    ) {
        Ok(run) => (StatusCode::OK, Json(run)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn links_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<LinksRequest>,
) -> Response
where
    W: SheetWriter + 'static,
{
    let links = match (&request.links_csv, &request.links_text) {
        (Some(csv), _) => match intake::read_links(Cursor::new(csv)) {
            Ok(links) => links,
            Err(error) => return error_response(error.into()),
        },
        (None, Some(text)) => intake::parse_link_lines(text),
        (None, None) => {
            let payload = json!({ "error": "links_csv or links_text is required" });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.links(&links, &request.destinations) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn merge_handler<W>(
    State(service): State<Arc<PriorityOperationsService<W>>>,
    Json(request): Json<MergeInput>,
) -> Response
where
    W: SheetWriter + 'static,
{
    match service.merge(&request) {
        Ok(merged) => {
            let body = MergeResponse {
                accepted_rows: merged.accepted.len(),
                rejected_rows: merged.rejected.len(),
                outcome: merged.outcome,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: OperationsError) -> Response {
    let status = match error {
        OperationsError::Intake(_)
        | OperationsError::Distribution(_)
        | OperationsError::Ledger(_) => StatusCode::BAD_REQUEST,
        OperationsError::Sheet(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
