//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::PersonStore`]. Request bodies and query strings are
//! validated here; everything past validation is delegated to the use cases
//! in [`roster_core::usecase`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::app(AppState::new(Arc::new(store)), RuntimeEnv::Production);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod persons;
pub mod response;
pub mod seed;
pub mod validate;

use std::sync::Arc;

use axum::{
  Router, middleware,
  routing::{get, post},
};
use roster_core::{
  store::PersonStore,
  usecase::{CreatePerson, GetActivePersons, GetAllPersons},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use config::{RuntimeEnv, ServerConfig};
pub use error::ApiError;

/// Every route lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

// ─── Application state ────────────────────────────────────────────────────────

/// The use cases shared by all handlers.
pub struct AppState<S> {
  pub create_person:      CreatePerson<S>,
  pub get_all_persons:    GetAllPersons<S>,
  pub get_active_persons: GetActivePersons<S>,
}

impl<S: PersonStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      create_person:      CreatePerson::new(store.clone()),
      get_all_persons:    GetAllPersons::new(store.clone()),
      get_active_persons: GetActivePersons::new(store),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      create_person:      self.create_person.clone(),
      get_all_persons:    self.get_all_persons.clone(),
      get_active_persons: self.get_active_persons.clone(),
    }
  }
}

// ─── Routers ──────────────────────────────────────────────────────────────────

/// The versioned API routes, without prefix, route fallback or middleware.
///
/// A known path requested with an unsupported method is answered like an
/// unknown route: 404 with the JSON envelope, not a bare 405.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route(
      "/persons",
      post(persons::create::<S>)
        .get(persons::list::<S>)
        .fallback(error::not_found),
    )
    .route(
      "/persons/active",
      get(persons::active::<S>).fallback(error::not_found),
    )
    .route("/health", get(health::handler).fallback(error::not_found))
    .with_state(state)
}

/// The complete application: the API nested under [`API_PREFIX`], a JSON 404
/// for everything else, request tracing and the centralized error renderer.
pub fn app<S>(state: AppState<S>, env: RuntimeEnv) -> Router
where
  S: PersonStore + 'static,
{
  Router::new()
    .nest(API_PREFIX, api_router(state))
    .fallback(error::not_found)
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(env, error::render_errors)),
    )
}

// ─── Integration tests ────────────────────────────────────────────────────────
