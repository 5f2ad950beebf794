//! API error type and the centralized error renderer.
//!
//! Handlers return [`ApiError`]. Its [`IntoResponse`] impl only records the
//! status and an [`ErrorReport`] in the response extensions; the
//! [`render_errors`] middleware is the single place that logs the failure
//! and writes the JSON envelope
//! `{"success": false, "message": ..., "errors"?: ..., "stack"?: ...}`.

use axum::{
  Json,
  extract::{Request, State},
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{config::RuntimeEnv, validate::ValidationErrors};

/// Replaces the message of server errors in production.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred.";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Validation failed")]
  Validation(ValidationErrors),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error("Not Found")]
  NotFound,

  #[error(transparent)]
  Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<ValidationErrors> for ApiError {
  fn from(e: ValidationErrors) -> Self { ApiError::Validation(e) }
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    match e {
      roster_core::Error::AlreadyExists(_) => ApiError::Conflict(e.to_string()),
      other => ApiError::Internal(Box::new(other)),
    }
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// Everything the renderer needs, detached from the error value so it can
/// travel in response extensions.
#[derive(Debug, Clone)]
pub struct ErrorReport {
  pub status:  StatusCode,
  pub message: String,
  pub errors:  Option<ValidationErrors>,
  /// `Display` of the error followed by each `source()` in turn.
  pub chain:   Vec<String>,
}

impl From<&ApiError> for ErrorReport {
  fn from(e: &ApiError) -> Self {
    let mut chain = vec![e.to_string()];
    let mut source = std::error::Error::source(e);
    while let Some(s) = source {
      chain.push(s.to_string());
      source = s.source();
    }

    ErrorReport {
      status: e.status(),
      message: e.to_string(),
      errors: match e {
        ApiError::Validation(v) => Some(v.clone()),
        _ => None,
      },
      chain,
    }
  }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors:  Option<ValidationErrors>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stack:   Option<String>,
}

impl ErrorReport {
  /// Shape the envelope for `env`: server-error messages are hidden in
  /// production and the cause chain is only exposed in development.
  pub fn envelope(&self, env: RuntimeEnv) -> ErrorEnvelope {
    let message =
      if self.status.is_server_error() && env == RuntimeEnv::Production {
        GENERIC_MESSAGE.to_owned()
      } else {
        self.message.clone()
      };

    let stack = (env == RuntimeEnv::Development).then(|| {
      let mut lines = self.chain.iter();
      let mut out = format!("Error: {}", lines.next().map_or("", |s| s));
      for cause in lines {
        out.push_str("\n    caused by: ");
        out.push_str(cause);
      }
      out
    });

    ErrorEnvelope {
      success: false,
      message,
      errors: self.errors.clone(),
      stack,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let report = ErrorReport::from(&self);
    let mut res = report.status.into_response();
    res.extensions_mut().insert(report);
    res
  }
}

// ─── Middleware ──────────────────────────────────────────────────────────────

/// Turn any response carrying an [`ErrorReport`] into the JSON error
/// envelope. Server errors are logged at `error`; client errors only at
/// `debug`.
pub async fn render_errors(
  State(env): State<RuntimeEnv>,
  req: Request,
  next: Next,
) -> Response {
  let method = req.method().clone();
  let uri = req.uri().clone();

  let mut res = next.run(req).await;
  let Some(report) = res.extensions_mut().remove::<ErrorReport>() else {
    return res;
  };

  if report.status.is_server_error() {
    tracing::error!(
      %method,
      %uri,
      status = report.status.as_u16(),
      error = %report.chain.join(": "),
      "unhandled error occurred",
    );
  } else {
    tracing::debug!(
      %method,
      %uri,
      status = report.status.as_u16(),
      message = %report.message,
      "request rejected",
    );
  }

  (report.status, Json(report.envelope(env))).into_response()
}

/// Router fallback for unmatched routes.
pub async fn not_found() -> ApiError { ApiError::NotFound }
