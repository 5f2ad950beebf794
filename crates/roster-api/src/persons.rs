//! Handlers for `/persons` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/persons` | JSON or form body: `name`, `favoriteFood`, `favoriteMovie`, `status?`; returns 201 |
//! | `GET`  | `/persons` | Optional `status`, `sortBy`, `sortOrder` |
//! | `GET`  | `/persons/active` | Optional `sortBy`, `sortOrder`; reduced projection |

use std::collections::HashMap;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  person::{ActivePerson, Person},
  store::PersonStore,
};

use crate::{
  AppState,
  error::ApiError,
  extract::JsonOrForm,
  response::{Many, Single},
  validate::{ActivePersonsQuerySchema, CreatePersonSchema, GetPersonsQuerySchema},
};

pub const NO_ACTIVE_MESSAGE: &str = "No active records found.";

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons` — returns 201 + the stored [`Person`]. The body may be
/// JSON or a urlencoded form.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  JsonOrForm(body): JsonOrForm,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore + 'static,
{
  let input = CreatePersonSchema::parse(&body)?;

  let person = state.create_person.execute(input).await?;
  tracing::info!(id = %person.id, name = %person.name, "person created");

  Ok((StatusCode::CREATED, Json(Single::new(person))))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons[?status=...][&sortBy=...][&sortOrder=asc|desc]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Many<Person>>, ApiError>
where
  S: PersonStore + 'static,
{
  let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let options = GetPersonsQuerySchema::parse(&query)?;
  let persons = state.get_all_persons.execute(&options).await?;
  Ok(Json(Many::new(persons)))
}

// ─── Active ───────────────────────────────────────────────────────────────────

/// `GET /persons/active[?sortBy=...][&sortOrder=asc|desc]`
///
/// An empty result is still a 200, with an explanatory `message`.
pub async fn active<S>(
  State(state): State<AppState<S>>,
  query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Many<ActivePerson>>, ApiError>
where
  S: PersonStore + 'static,
{
  let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let sort = ActivePersonsQuerySchema::parse(&query)?;
  let persons = state.get_active_persons.execute(sort).await?;

  if persons.is_empty() {
    tracing::info!("no active person records found");
    return Ok(Json(Many::new(persons).with_message(NO_ACTIVE_MESSAGE)));
  }
  Ok(Json(Many::new(persons)))
}
