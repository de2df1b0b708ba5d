use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wellplan::{state::AppState, web};

fn app() -> Router {
    app_with_chat_limit(100)
}

fn app_with_chat_limit(limit: usize) -> Router {
    web::routes(AppState::in_memory(limit).shared())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn healthy_profile() -> Value {
    json!({
        "height": "170",
        "weight": "70",
        "exerciseFrequency": "daily",
        "sleepHours": 8,
        "stressLevel": 2,
        "diet": "vegetarian",
        "waterIntake": "2-3L",
        "medicalConditions": [],
        "smokingStatus": "never",
        "alcoholConsumption": "never"
    })
}

fn struggling_profile() -> Value {
    json!({
        "height": 170,
        "weight": 70,
        "exerciseFrequency": "never",
        "sleepHours": 4,
        "stressLevel": 9,
        "waterIntake": "2-3L",
        "medicalConditions": ["Diabetes", "Hypertension"],
        "smokingStatus": "regular",
        "alcoholConsumption": "weekly"
    })
}

#[tokio::test]
async fn health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn insights_for_healthy_profile() {
    let (status, body) = send(&app(), Method::POST, "/api/insights", Some(healthy_profile())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bmi"]["category"], "Healthy Weight");
    assert_eq!(body["sleep"]["quality"], "Good");
    assert_eq!(body["sleep"]["score"], 9);
    assert_eq!(body["stress"]["category"], "Low");
    for bucket in ["general", "nutrition", "fitness", "mental"] {
        assert!(
            !body["recommendations"][bucket].as_array().unwrap().is_empty(),
            "{bucket} bucket is empty"
        );
    }
}

#[tokio::test]
async fn insights_for_struggling_profile() {
    let (status, body) =
        send(&app(), Method::POST, "/api/insights", Some(struggling_profile())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sleep"]["quality"], "Poor");
    assert_eq!(body["stress"]["category"], "High");

    let categories: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    for expected in ["sleep-improvement", "stress-management", "diabetes-management"] {
        assert!(categories.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn health_score_endpoint() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/health-score", Some(struggling_profile())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "current": 37, "target": 57 }));

    let (_, body) = send(&app, Method::POST, "/api/health-score", Some(healthy_profile())).await;
    assert_eq!(body, json!({ "current": 100, "target": 100 }));
}

#[tokio::test]
async fn unknown_enum_value_is_rejected() {
    let mut profile = healthy_profile();
    profile["smokingStatus"] = json!("sometimes");
    let (status, _) = send(&app(), Method::POST, "/api/insights", Some(profile)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_profile_still_gets_insights() {
    let (status, body) = send(&app(), Method::POST, "/api/insights", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bmi"]["score"], 0.0);
    assert_eq!(body["bmi"]["category"], "Underweight");
}

#[tokio::test]
async fn lifestyle_plan_with_attached_payloads() {
    let app = app();
    let (_, report) = send(
        &app,
        Method::POST,
        "/api/reports/analyze",
        Some(json!({ "reportName": "lipid-panel.pdf" })),
    )
    .await;

    let (status, plan) = send(
        &app,
        Method::POST,
        "/api/lifestyle-plan",
        Some(json!({ "profile": struggling_profile(), "reportAnalysis": report })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["duration"], 12);
    assert_eq!(plan["scores"]["current"], 37);
    assert_eq!(
        plan["focusAreas"],
        json!([
            "Physical Activity",
            "Sleep Quality",
            "Stress Management",
            "Chronic Condition Management",
            "Smoking Cessation"
        ])
    );
    assert_eq!(plan["exercise"]["weeklyGoals"]["steps"], 7000);
    assert_eq!(plan["sleep"]["goals"]["duration"], 5.0);
    assert_eq!(plan["stress"]["dailyPractices"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn chatbot_answers_from_rules_without_api_key() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/chatbot",
        Some(json!({
            "message": "I have insomnia",
            "history": [{ "id": "1", "role": "assistant", "content": "Namaste!" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().contains("Vata"));
}

#[tokio::test]
async fn chatbot_rejects_empty_message() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/chatbot", Some(json!({ "message": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/api/chatbot", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chatbot_is_rate_limited() {
    let app = app_with_chat_limit(2);
    let body = json!({ "message": "hello" });
    for _ in 0..2 {
        let (status, _) = send(&app, Method::POST, "/api/chatbot", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&app, Method::POST, "/api/chatbot", Some(body)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn forwarded_header_does_not_reset_the_chat_limit() {
    let app = app_with_chat_limit(2);
    let mut statuses = Vec::new();
    for i in 0..10 {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/chatbot")
            .header("content-type", "application/json")
            .header("x-forwarded-for", format!("10.0.0.{i}"))
            .body(Body::from(json!({ "message": "hello" }).to_string()))
            .unwrap();
        statuses.push(app.clone().oneshot(request).await.unwrap().status());
    }
    let allowed = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(allowed, 2);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn consultation_prescription_by_specialty() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/consultations/prescription",
        Some(json!({
            "messages": [{ "text": "My stomach hurts after meals", "sender": "user" }],
            "specialty": "Gastroenterologist"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["specialty"], "Gastroenterology");
    assert_eq!(body["followUp"]["nextAppointment"], "6 weeks from today");
}

#[tokio::test]
async fn product_recommendations() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/products?categories=sleep-support,%20stress-relief",
        None,
    )
    .await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 6);
    assert_eq!(&ids[..2], &["ashwagandha-500mg", "sleep-formula"]);
}

#[tokio::test]
async fn profile_lifecycle() {
    let app = app();
    let id = Uuid::new_v4();
    let base = format!("/api/profiles/{id}");

    let (status, _) = send(&app, Method::GET, &format!("{base}/dashboard"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &format!("{base}/lifestyle-plan"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, stored) = send(
        &app,
        Method::PUT,
        &format!("{base}/health-data"),
        Some(struggling_profile()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["heightCm"], 170.0);

    let (status, fetched) = send(&app, Method::GET, &format!("{base}/health-data"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, stored);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("{base}/user"),
        Some(json!({ "name": "Asha", "email": "asha@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, dashboard) = send(&app, Method::GET, &format!("{base}/dashboard"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["user"]["name"], "Asha");
    assert_eq!(dashboard["scores"]["current"], 37);
    assert_eq!(dashboard["insights"]["stress"]["category"], "High");
    assert!(!dashboard["products"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::GET, &format!("{base}/report-analysis"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, analysis) = send(
        &app,
        Method::POST,
        &format!("{base}/reports"),
        Some(json!({ "reportName": "CBC results" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, stored_analysis) =
        send(&app, Method::GET, &format!("{base}/report-analysis"), None).await;
    assert_eq!(stored_analysis, analysis);
    assert_eq!(analysis["abnormalParameters"][0]["name"], "Hemoglobin");

    let (status, prescription) = send(
        &app,
        Method::POST,
        &format!("{base}/consultations"),
        Some(json!({ "messages": [], "specialty": "Cardiology" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, stored_prescription) = send(
        &app,
        Method::GET,
        &format!("{base}/consultation-prescription"),
        None,
    )
    .await;
    assert_eq!(stored_prescription, prescription);

    let (status, plan) = send(&app, Method::GET, &format!("{base}/lifestyle-plan"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["scores"]["target"], 57);

    let (status, _) = send(&app, Method::DELETE, &base, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("{base}/health-data"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &format!("{base}/report-analysis"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profiles_are_isolated() {
    let app = app();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    send(
        &app,
        Method::PUT,
        &format!("/api/profiles/{first}/health-data"),
        Some(healthy_profile()),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/profiles/{second}/health-data"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_profile_id_is_a_client_error() {
    let (status, _) = send(&app(), Method::GET, "/api/profiles/not-a-uuid/dashboard", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
