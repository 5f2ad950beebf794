//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The use cases in [`crate::usecase`] depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::person::{ListOptions, NewPerson, Person, Sort};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  /// Backend error. Must convert into [`crate::Error`] so that a violated
  /// uniqueness constraint surfaces as [`crate::Error::AlreadyExists`].
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Insert a new person and return the stored record, including the
  /// generated id and timestamps.
  ///
  /// Fails if a person with the same name already exists.
  fn create(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// List persons, optionally filtered by status and ordered by `sort`.
  /// Without a sort the order is whatever the backend returns.
  fn find_all<'a>(
    &'a self,
    options: &'a ListOptions,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Equivalent to [`find_all`](Self::find_all) with the status fixed to
  /// [`Status::Active`](crate::person::Status::Active).
  fn find_active(
    &self,
    sort: Option<Sort>,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by exact name. Returns `None` if not found.
  fn find_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;
}
