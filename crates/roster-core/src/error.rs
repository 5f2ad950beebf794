//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A person with this name is already stored. Raised both by the
  /// pre-insert lookup and by the store's unique constraint on `name`.
  #[error("Person with name \"{0}\" already exists.")]
  AlreadyExists(String),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown sort field: {0:?}")]
  UnknownSortField(String),

  #[error("unknown sort order: {0:?}")]
  UnknownSortOrder(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
