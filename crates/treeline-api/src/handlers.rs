//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use treeline_core::Error;
use treeline_hierarchy::TreeNode;
use treeline_store::{fetch_forest, seed};

use crate::state::ApiState;

/// Body of a successful `POST /populate`.
pub const POPULATED: &str = "Database populated";

/// Body of a failed `GET /nodes`.
pub const FETCH_FAILED: &str = "Error fetching node data";

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// `ok`, or the store's error message.
    pub store: String,
}

/// `POST /populate`: wipe the store and load the configured dataset.
///
/// Errors are returned to the caller verbatim with a 500.
pub async fn populate(State(state): State<ApiState>) -> Response {
    match seed(state.store.as_ref(), &state.seed).await {
        Ok(summary) => {
            tracing::info!(
                nodes = summary.nodes_created,
                edges = summary.edges_created,
                "database populated"
            );
            (StatusCode::OK, POPULATED).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "populate failed");
            (StatusCode::INTERNAL_SERVER_ERROR, failure_message(err)).into_response()
        }
    }
}

/// Body text for a failed populate: the store's own message, unprefixed.
/// Other failures (an invalid dataset) keep their descriptive form.
fn failure_message(err: Error) -> String {
    match err {
        Error::Store(message) => message,
        other => other.to_string(),
    }
}

/// `GET /nodes`: the current hierarchy as a forest.
pub async fn nodes(
    State(state): State<ApiState>,
) -> Result<Json<Vec<TreeNode>>, (StatusCode, &'static str)> {
    match fetch_forest(state.store.as_ref()).await {
        Ok(forest) => Ok(Json(forest)),
        Err(err) => {
            tracing::error!(error = %err, "Error fetching node data");
            Err((StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED))
        }
    }
}

/// `GET /health`: whether the store answers.
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                store: "ok".to_string(),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    store: err.to_string(),
                }),
            )
        }
    }
}
