//! Request schemas.
//!
//! Each schema turns raw request input (a JSON body or the query string) into
//! typed core input, or reports every offending field at once. Nothing here
//! touches the store; handlers run a schema before invoking any use case.

use std::{collections::BTreeMap, collections::HashMap, fmt, str::FromStr};

use roster_core::person::{
  ListOptions, NewPerson, Sort, SortField, SortOrder, Status,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which errors about the input as a whole are reported.
pub const FORM_KEY: &str = "_";

// ─── ValidationErrors ────────────────────────────────────────────────────────

/// Field name → messages. Serialises as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_owned()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn field(&self, name: &str) -> Option<&[String]> {
    self.0.get(name).map(Vec::as_slice)
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  fn finish<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      for m in messages {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {m}")?;
        first = false;
      }
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn type_name(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn expected_one_of(allowed: &[&str]) -> String {
  allowed
    .iter()
    .map(|a| format!("'{a}'"))
    .collect::<Vec<_>>()
    .join(" | ")
}

/// A required, non-empty string field.
fn required_string(
  obj: &Map<String, Value>,
  field: &str,
  empty_message: &str,
  errors: &mut ValidationErrors,
) -> Option<String> {
  match obj.get(field) {
    None => {
      errors.add(field, "Required");
      None
    }
    Some(Value::String(s)) if s.is_empty() => {
      errors.add(field, empty_message);
      None
    }
    Some(Value::String(s)) => Some(s.clone()),
    Some(other) => {
      errors.add(
        field,
        format!("Expected string, received {}", type_name(other)),
      );
      None
    }
  }
}

/// Parse an enumerated value, recording a message listing the allowed
/// spellings on failure.
fn parse_enum<T: FromStr>(
  field: &str,
  raw: &str,
  allowed: &[&str],
  errors: &mut ValidationErrors,
) -> Option<T> {
  match raw.parse() {
    Ok(v) => Some(v),
    Err(_) => {
      errors.add(
        field,
        format!(
          "Invalid enum value. Expected {}, received '{raw}'",
          expected_one_of(allowed)
        ),
      );
      None
    }
  }
}

fn status_names() -> Vec<&'static str> {
  Status::ALL.iter().map(|s| s.as_str()).collect()
}

fn sort_field_names() -> Vec<&'static str> {
  SortField::ALL.iter().map(|f| f.as_str()).collect()
}

fn sort_order_names() -> Vec<&'static str> {
  SortOrder::ALL.iter().map(|o| o.as_str()).collect()
}

fn parse_sort(
  query: &HashMap<String, String>,
  errors: &mut ValidationErrors,
) -> Option<Sort> {
  let field = query
    .get("sortBy")
    .and_then(|raw| parse_enum::<SortField>("sortBy", raw, &sort_field_names(), errors));
  let order = query
    .get("sortOrder")
    .map(|raw| parse_enum::<SortOrder>("sortOrder", raw, &sort_order_names(), errors))
    .unwrap_or(Some(SortOrder::default()));

  match (field, order) {
    (Some(field), Some(order)) => Some(Sort { field, order }),
    _ => None,
  }
}

// ─── Schemas ─────────────────────────────────────────────────────────────────

/// Body of `POST /persons`.
///
/// `name`, `favoriteFood` and `favoriteMovie` must be non-empty strings;
/// `status` is optional and defaults to `Active`. Unknown keys are ignored.
pub struct CreatePersonSchema;

impl CreatePersonSchema {
  pub fn parse(body: &Value) -> Result<NewPerson, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(obj) = body.as_object() else {
      errors.add(
        FORM_KEY,
        format!("Expected object, received {}", type_name(body)),
      );
      return Err(errors);
    };

    let name = required_string(obj, "name", "Name is required", &mut errors);
    let favorite_food = required_string(
      obj,
      "favoriteFood",
      "Favorite food is required",
      &mut errors,
    );
    let favorite_movie = required_string(
      obj,
      "favoriteMovie",
      "Favorite movie is required",
      &mut errors,
    );

    let status = match obj.get("status") {
      None => Some(Status::default()),
      Some(Value::String(raw)) => {
        parse_enum::<Status>("status", raw, &status_names(), &mut errors)
      }
      Some(other) => {
        errors.add(
          "status",
          format!(
            "Expected {}, received {}",
            expected_one_of(&status_names()),
            type_name(other)
          ),
        );
        None
      }
    };

    match (name, favorite_food, favorite_movie, status) {
      (Some(name), Some(favorite_food), Some(favorite_movie), Some(status))
        if errors.is_empty() =>
      {
        Ok(NewPerson { name, favorite_food, favorite_movie, status })
      }
      _ => Err(errors),
    }
  }
}

/// Query string of `GET /persons`: optional `status`, `sortBy` and
/// `sortOrder` (default `asc`).
pub struct GetPersonsQuerySchema;

impl GetPersonsQuerySchema {
  pub fn parse(
    query: &HashMap<String, String>,
  ) -> Result<ListOptions, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let status = query
      .get("status")
      .and_then(|raw| parse_enum::<Status>("status", raw, &status_names(), &mut errors));
    let sort = parse_sort(query, &mut errors);

    errors.finish(ListOptions { status, sort })
  }
}

/// Query string of `GET /persons/active`: only `sortBy` and `sortOrder`.
/// A `status` key is ignored; the listing is always restricted to active
/// persons.
pub struct ActivePersonsQuerySchema;

impl ActivePersonsQuerySchema {
  pub fn parse(
    query: &HashMap<String, String>,
  ) -> Result<Option<Sort>, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let sort = parse_sort(query, &mut errors);
    errors.finish(sort)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect()
  }

  #[test]
  fn create_defaults_status() {
    let input = CreatePersonSchema::parse(&json!({
      "name": "Jane Doe",
      "favoriteFood": "Tacos",
      "favoriteMovie": "The Matrix",
    }))
    .unwrap();
    assert_eq!(input.status, Status::Active);
    assert_eq!(input.name, "Jane Doe");
  }

  #[test]
  fn create_accepts_explicit_status() {
    let input = CreatePersonSchema::parse(&json!({
      "name": "Jane Doe",
      "favoriteFood": "Tacos",
      "favoriteMovie": "The Matrix",
      "status": "Inactive",
    }))
    .unwrap();
    assert_eq!(input.status, Status::Inactive);
  }

  #[test]
  fn create_reports_every_empty_field() {
    let errs = CreatePersonSchema::parse(&json!({
      "name": "Jane",
      "favoriteFood": "",
      "favoriteMovie": "",
    }))
    .unwrap_err();
    assert_eq!(
      errs.field("favoriteFood").unwrap(),
      ["Favorite food is required"]
    );
    assert_eq!(
      errs.field("favoriteMovie").unwrap(),
      ["Favorite movie is required"]
    );
    assert!(errs.field("name").is_none());
  }

  #[test]
  fn create_reports_missing_and_mistyped_fields() {
    let errs = CreatePersonSchema::parse(&json!({
      "favoriteFood": 42,
      "status": "Pending",
    }))
    .unwrap_err();
    assert_eq!(errs.field("name").unwrap(), ["Required"]);
    assert_eq!(errs.field("favoriteMovie").unwrap(), ["Required"]);
    assert_eq!(
      errs.field("favoriteFood").unwrap(),
      ["Expected string, received number"]
    );
    assert_eq!(
      errs.field("status").unwrap(),
      ["Invalid enum value. Expected 'Active' | 'Inactive', received 'Pending'"]
    );
  }

  #[test]
  fn create_rejects_explicit_nulls() {
    let errs = CreatePersonSchema::parse(&json!({
      "name": null,
      "favoriteFood": "Tacos",
      "favoriteMovie": "The Matrix",
      "status": null,
    }))
    .unwrap_err();
    assert_eq!(errs.field("name").unwrap(), ["Expected string, received null"]);
    assert_eq!(
      errs.field("status").unwrap(),
      ["Expected 'Active' | 'Inactive', received null"]
    );
  }

  #[test]
  fn create_rejects_non_object() {
    let errs = CreatePersonSchema::parse(&json!(["x"])).unwrap_err();
    assert_eq!(
      errs.field(FORM_KEY).unwrap(),
      ["Expected object, received array"]
    );
  }

  #[test]
  fn list_query_all_optional() {
    let opts = GetPersonsQuerySchema::parse(&query(&[])).unwrap();
    assert_eq!(opts, ListOptions::default());
  }

  #[test]
  fn list_query_parses_everything() {
    let opts = GetPersonsQuerySchema::parse(&query(&[
      ("status", "Inactive"),
      ("sortBy", "favoriteFood"),
      ("sortOrder", "desc"),
      ("page", "2"),
    ]))
    .unwrap();
    assert_eq!(opts.status, Some(Status::Inactive));
    assert_eq!(opts.sort, Some(Sort::desc(SortField::FavoriteFood)));
  }

  #[test]
  fn list_query_sort_order_defaults_to_asc() {
    let opts =
      GetPersonsQuerySchema::parse(&query(&[("sortBy", "name")])).unwrap();
    assert_eq!(opts.sort, Some(Sort::asc(SortField::Name)));
  }

  #[test]
  fn list_query_sort_order_alone_does_not_sort() {
    let opts =
      GetPersonsQuerySchema::parse(&query(&[("sortOrder", "desc")])).unwrap();
    assert_eq!(opts.sort, None);
  }

  #[test]
  fn list_query_rejects_unknown_enums() {
    let errs = GetPersonsQuerySchema::parse(&query(&[
      ("status", "active"),
      ("sortBy", "id"),
      ("sortOrder", "up"),
    ]))
    .unwrap_err();
    let fields: Vec<_> = errs.fields().collect();
    assert_eq!(fields, ["sortBy", "sortOrder", "status"]);
    assert!(errs.field("sortBy").unwrap()[0].contains("'favoriteMovie'"));
  }

  #[test]
  fn active_query_ignores_status() {
    let sort = ActivePersonsQuerySchema::parse(&query(&[
      ("status", "Inactive"),
      ("sortBy", "name"),
      ("sortOrder", "desc"),
    ]))
    .unwrap();
    assert_eq!(sort, Some(Sort::desc(SortField::Name)));
  }

  #[test]
  fn display_joins_messages() {
    let mut errs = ValidationErrors::default();
    errs.add("a", "one");
    errs.add("b", "two");
    assert_eq!(errs.to_string(), "a: one; b: two");
  }
}
