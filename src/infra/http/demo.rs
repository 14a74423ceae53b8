//! Load-testing scaffolding endpoints.
//!
//! These exist to give synthetic traffic something to hit: fixed and random
//! latency, a CPU burn, unpredictable status codes and a guaranteed failure.
//! None of them touch the todo store or the cache.

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::error::{ApiError, codes};

pub async fn root() -> impl IntoResponse {
    debug!("debugging log");
    info!("info log");
    warn!("hey, this is a warning!");
    error!("oops, we have an error");
    Json(json!({"Hello": "World"}))
}

pub async fn io_task() -> impl IntoResponse {
    sleep(Duration::from_secs(1)).await;
    info!("io task");
    "IO bound task finish!"
}

pub async fn cpu_task() -> impl IntoResponse {
    for i in 0u64..1000 {
        std::hint::black_box(i * i * i);
    }
    info!("cpu task");
    "CPU bound task finish!"
}

pub async fn random_status() -> Response {
    let status = *[
        StatusCode::OK,
        StatusCode::OK,
        StatusCode::MULTIPLE_CHOICES,
        StatusCode::BAD_REQUEST,
        StatusCode::INTERNAL_SERVER_ERROR,
    ]
    .choose(&mut rand::rng())
    .unwrap_or(&StatusCode::OK);
    info!(status = status.as_u16(), "random status");
    (status, Json(json!({"path": "/random_status"}))).into_response()
}

pub async fn error() -> ApiError {
    error!("Critical error. Please fix this!");
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        codes::INTERNAL,
        "This is an error",
        None,
    )
}

pub async fn random_sleep() -> impl IntoResponse {
    let secs = rand::rng().random_range(0..=5);
    sleep(Duration::from_secs(secs)).await;
    info!(secs, "random sleep");
    Json(json!({"path": "/random_sleep"}))
}
