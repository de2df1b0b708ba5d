use crate::analytics::health_score::HealthScores;
use crate::analytics::insights::{generate_health_insights, HealthInsights};
use crate::domain::models::HealthProfile;
use crate::services::consultation::Prescription;
use crate::services::lifestyle::{generate_lifestyle_plan, LifestylePlan};
use crate::services::report_analysis::ReportAnalysis;
use crate::state::SharedState;
use axum::{routing::post, Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LifestylePlanRequest {
    profile: HealthProfile,
    #[serde(default)]
    report_analysis: Option<ReportAnalysis>,
    #[serde(default)]
    consultation_prescription: Option<Prescription>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/insights", post(insights))
        .route("/health-score", post(health_score))
        .route("/lifestyle-plan", post(lifestyle_plan))
        .with_state(state)
}

async fn insights(Json(profile): Json<HealthProfile>) -> Json<HealthInsights> {
    Json(generate_health_insights(&profile))
}

async fn health_score(Json(profile): Json<HealthProfile>) -> Json<HealthScores> {
    Json(HealthScores::for_profile(&profile))
}

async fn lifestyle_plan(Json(req): Json<LifestylePlanRequest>) -> Json<LifestylePlan> {
    Json(generate_lifestyle_plan(
        &req.profile,
        req.report_analysis.as_ref(),
        req.consultation_prescription.as_ref(),
    ))
}
