//! HTTP-JSON interface: `GET /symptoms` and `POST /predict`.
//!
//! The model bundle is loaded (or trained) once at startup and shared
//! read-only across requests; handlers never mutate it, so no locking.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use symptom2disease::{DiseasePredictor, Prediction};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
struct AppState {
    predictor: Arc<DiseasePredictor>,
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    #[serde(default)]
    symptoms: String,
}

#[derive(Debug, Serialize)]
struct SymptomsResponse {
    symptoms: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: state.predictor.vocab().sorted_names(),
    })
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Prediction>, (StatusCode, Json<ErrorResponse>)> {
    match state.predictor.predict_line(&request.symptoms) {
        Ok(prediction) => Ok(Json(prediction)),
        Err(err) if err.is_validation() => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )),
        Err(err) => {
            tracing::error!(error = %err, "model artifacts are inconsistent");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal consistency error".to_string(),
                }),
            ))
        }
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/symptoms", get(list_symptoms))
        .route("/predict", post(predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let predictor = DiseasePredictor::load_or_train_if_stale(
        Path::new("models/disease_model.msgpack"),
        Path::new("data/raw/dataset.csv"),
        0.2,
    )?;

    let state = AppState {
        predictor: Arc::new(predictor),
    };
    let app = build_router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("disease prediction server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
