use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpulse_core::{Platform, PlatformResult};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeResponse {
    pub success: bool,
    pub topic: String,
    pub results: Vec<PlatformResult>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct CapabilityInfo {
    pub message: &'static str,
    pub usage: &'static str,
    pub platforms: Vec<Platform>,
}

/// `POST /api/scrape` — runs the aggregation for a topic.
///
/// Topic validation happens here at the boundary; the aggregator itself is
/// total and always produces one result per platform.
pub(super) async fn run_scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::bad_request("invalid request body").with_details(rejection.body_text())
    })?;

    let topic = request.topic.as_deref().map(str::trim).unwrap_or_default();
    if topic.is_empty() {
        return Err(ApiError::bad_request(
            "topic is required and must be a non-empty string",
        ));
    }

    let results = state.aggregator.aggregate(topic).await;

    Ok(Json(ScrapeResponse {
        success: true,
        topic: topic.to_string(),
        results,
        timestamp: Utc::now(),
    }))
}

/// `GET /api/scrape` — static capability metadata.
pub(super) async fn describe_scrape(State(state): State<AppState>) -> Json<CapabilityInfo> {
    Json(CapabilityInfo {
        message: "devpulse topic aggregation API",
        usage: "POST /api/scrape with { \"topic\": \"your-search-term\" }",
        platforms: state.aggregator.platforms(),
    })
}
