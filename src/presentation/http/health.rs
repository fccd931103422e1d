use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::snapshot::store::SnapshotStore;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(store): State<Arc<SnapshotStore>>) -> Json<HealthResp> {
    let loaded = store.current().await.is_some();
    let status = if loaded { "ok" } else { "degraded" };
    Json(HealthResp { status })
}

pub fn routes(store: Arc<SnapshotStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(store)
}
