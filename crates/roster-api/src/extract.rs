//! Request body extractor.

use std::collections::HashMap;

use axum::{
  Form, Json,
  extract::{FromRequest, Request},
  http::header,
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A request body as a JSON value, read from either `application/json` or
/// `application/x-www-form-urlencoded`.
///
/// Form fields become string members of a JSON object, so both encodings go
/// through the same schema. Any other content type is rejected the way the
/// JSON extractor rejects it.
#[derive(Debug, Clone)]
pub struct JsonOrForm(pub Value);

fn is_form(req: &Request) -> bool {
  req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .and_then(|ct| ct.split(';').next())
    .is_some_and(|mime| {
      mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded")
    })
}

impl<S> FromRequest<S> for JsonOrForm
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    if is_form(&req) {
      let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      let obj: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
      return Ok(JsonOrForm(Value::Object(obj)));
    }

    let Json(value) = Json::<Value>::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(JsonOrForm(value))
  }
}

#[cfg(test)]
mod tests {
  use axum::body::Body;

  use super::*;

  fn request(content_type: &str, body: &'static str) -> Request {
    Request::builder()
      .method("POST")
      .uri("/")
      .header(header::CONTENT_TYPE, content_type)
      .body(Body::from(body))
      .unwrap()
  }

  #[tokio::test]
  async fn form_fields_become_string_members() {
    let req = request(
      "application/x-www-form-urlencoded; charset=utf-8",
      "name=Jane+Doe&favoriteFood=Tacos&status=Inactive",
    );
    let JsonOrForm(value) = JsonOrForm::from_request(req, &()).await.unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "name": "Jane Doe",
        "favoriteFood": "Tacos",
        "status": "Inactive",
      })
    );
  }

  #[tokio::test]
  async fn json_body_passes_through() {
    let req = request("application/json", r#"{"name":null,"n":1}"#);
    let JsonOrForm(value) = JsonOrForm::from_request(req, &()).await.unwrap();
    assert_eq!(value, serde_json::json!({ "name": null, "n": 1 }));
  }

  #[tokio::test]
  async fn other_content_types_are_bad_requests() {
    let req = request("text/plain", "name=Jane");
    let err = JsonOrForm::from_request(req, &()).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }
}
