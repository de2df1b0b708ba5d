use crate::services::consultation::{Prescription, TranscriptMessage};
use crate::services::products::{recommend_products, Product};
use crate::services::report_analysis::ReportAnalysis;
use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportRequest {
    pub report_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConsultationRequest {
    #[serde(default)]
    pub messages: Vec<TranscriptMessage>,
    #[serde(default)]
    pub specialty: String,
}

#[derive(Debug, Deserialize)]
struct ProductQuery {
    categories: Option<String>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/reports/analyze", post(analyze_report))
        .route("/consultations/prescription", post(write_prescription))
        .route("/products", get(products))
        .with_state(state)
}

pub(crate) async fn run_report_analysis(
    state: &SharedState,
    req: &ReportRequest,
) -> Result<ReportAnalysis, StatusCode> {
    state.reports.analyze(&req.report_name).await.map_err(|e| {
        tracing::error!("Report analysis failed for {:?}: {}", req.report_name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub(crate) async fn run_prescription(
    state: &SharedState,
    req: &ConsultationRequest,
) -> Result<Prescription, StatusCode> {
    state
        .prescriptions
        .write(&req.messages, &req.specialty)
        .await
        .map_err(|e| {
            tracing::error!("Prescription generation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn analyze_report(
    State(state): State<SharedState>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportAnalysis>, StatusCode> {
    run_report_analysis(&state, &req).await.map(Json)
}

async fn write_prescription(
    State(state): State<SharedState>,
    Json(req): Json<ConsultationRequest>,
) -> Result<Json<Prescription>, StatusCode> {
    run_prescription(&state, &req).await.map(Json)
}

async fn products(Query(query): Query<ProductQuery>) -> Json<Vec<Product>> {
    let categories: Vec<&str> = query
        .categories
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    Json(recommend_products(&categories))
}
