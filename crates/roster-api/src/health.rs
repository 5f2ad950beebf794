//! Liveness probe.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: DateTime<Utc>,
}

/// `GET /health` — always `{"status":"UP","timestamp":...}`.
pub async fn handler() -> Json<Health> {
  Json(Health { status: "UP", timestamp: Utc::now() })
}
