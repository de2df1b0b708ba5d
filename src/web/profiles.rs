use crate::analytics::health_score::HealthScores;
use crate::analytics::insights::{generate_health_insights, HealthInsights};
use crate::db::{self, StoreError, StoreKey};
use crate::domain::models::{HealthProfile, UserDetails};
use crate::services::consultation::Prescription;
use crate::services::lifestyle::{generate_lifestyle_plan, LifestylePlan};
use crate::services::products::{recommend_products, Product};
use crate::services::report_analysis::ReportAnalysis;
use crate::state::SharedState;
use crate::web::analysis::{run_prescription, run_report_analysis, ConsultationRequest, ReportRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct DashboardResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserDetails>,
    insights: HealthInsights,
    scores: HealthScores,
    products: Vec<Product>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/:id", delete(delete_profile))
        .route(
            "/:id/health-data",
            get(get_health_data).put(put_health_data),
        )
        .route("/:id/user", put(put_user))
        .route("/:id/dashboard", get(dashboard))
        .route("/:id/lifestyle-plan", get(lifestyle_plan))
        .route("/:id/reports", post(upload_report))
        .route("/:id/report-analysis", get(get_report_analysis))
        .route("/:id/consultations", post(finish_consultation))
        .route(
            "/:id/consultation-prescription",
            get(get_consultation_prescription),
        )
        .with_state(state)
}

fn store_failure(e: StoreError) -> StatusCode {
    tracing::error!("Profile store error: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn load<T: DeserializeOwned>(
    state: &SharedState,
    id: Uuid,
    key: StoreKey,
) -> Result<Option<T>, StatusCode> {
    db::load_json(state.store.as_ref(), id, key)
        .await
        .map_err(store_failure)
}

async fn save<T: Serialize>(
    state: &SharedState,
    id: Uuid,
    key: StoreKey,
    value: &T,
) -> Result<(), StatusCode> {
    db::save_json(state.store.as_ref(), id, key, value)
        .await
        .map_err(store_failure)
}

async fn require_profile(state: &SharedState, id: Uuid) -> Result<HealthProfile, StatusCode> {
    load(state, id, StoreKey::HealthData)
        .await?
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_profile(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    db::delete_profile(state.store.as_ref(), id)
        .await
        .map_err(store_failure)?;
    tracing::info!("Deleted stored data for profile {}", id);
    Ok(StatusCode::NO_CONTENT)
}

async fn put_health_data(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(profile): Json<HealthProfile>,
) -> Result<Json<HealthProfile>, StatusCode> {
    save(&state, id, StoreKey::HealthData, &profile).await?;
    tracing::debug!("Stored health data for profile {}", id);
    Ok(Json(profile))
}

async fn get_health_data(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthProfile>, StatusCode> {
    require_profile(&state, id).await.map(Json)
}

async fn put_user(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(user): Json<UserDetails>,
) -> Result<Json<UserDetails>, StatusCode> {
    if user.name.trim().is_empty() || user.email.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    save(&state, id, StoreKey::User, &user).await?;
    Ok(Json(user))
}

async fn dashboard(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    let profile = require_profile(&state, id).await?;
    let user: Option<UserDetails> = load(&state, id, StoreKey::User).await?;

    let insights = generate_health_insights(&profile);
    let products = recommend_products(&insights.categories);
    Ok(Json(DashboardResponse {
        user,
        scores: HealthScores::for_profile(&profile),
        insights,
        products,
    }))
}

async fn lifestyle_plan(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LifestylePlan>, StatusCode> {
    let profile = require_profile(&state, id).await?;
    let report: Option<ReportAnalysis> = load(&state, id, StoreKey::ReportAnalysis).await?;
    let prescription: Option<Prescription> =
        load(&state, id, StoreKey::ConsultationPrescription).await?;

    Ok(Json(generate_lifestyle_plan(
        &profile,
        report.as_ref(),
        prescription.as_ref(),
    )))
}

async fn upload_report(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ReportAnalysis>, StatusCode> {
    let analysis = run_report_analysis(&state, &req).await?;
    save(&state, id, StoreKey::ReportAnalysis, &analysis).await?;
    Ok(Json(analysis))
}

async fn get_report_analysis(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportAnalysis>, StatusCode> {
    load(&state, id, StoreKey::ReportAnalysis)
        .await?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn finish_consultation(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ConsultationRequest>,
) -> Result<Json<Prescription>, StatusCode> {
    let prescription = run_prescription(&state, &req).await?;
    save(&state, id, StoreKey::ConsultationPrescription, &prescription).await?;
    Ok(Json(prescription))
}

async fn get_consultation_prescription(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Prescription>, StatusCode> {
    load(&state, id, StoreKey::ConsultationPrescription)
        .await?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
