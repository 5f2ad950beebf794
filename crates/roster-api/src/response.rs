//! Success envelopes.

use serde::Serialize;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Single<T> {
  pub success: bool,
  pub data:    T,
}

impl<T> Single<T> {
  pub fn new(data: T) -> Self { Self { success: true, data } }
}

/// `{"success": true, "count": n, "data": [...]}`, with an optional
/// `message` for empty results.
#[derive(Debug, Serialize)]
pub struct Many<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<&'static str>,
  pub count:   usize,
  pub data:    Vec<T>,
}

impl<T> Many<T> {
  pub fn new(data: Vec<T>) -> Self {
    Self { success: true, message: None, count: data.len(), data }
  }

  pub fn with_message(mut self, message: &'static str) -> Self {
    self.message = Some(message);
    self
  }
}
