//! Application use cases.
//!
//! Each use case owns a shared handle to a [`PersonStore`] and exposes a
//! single `execute` method. They hold no other state, so cloning one is the
//! cost of an `Arc` bump.

use std::sync::Arc;

use chrono::Utc;

use crate::{
  Error, Result,
  person::{ActivePerson, ListOptions, NewPerson, Person, Sort},
  store::PersonStore,
};

fn store_err<S: PersonStore>(e: S::Error) -> Error { e.into() }

// ─── CreatePerson ────────────────────────────────────────────────────────────

/// Create a person unless one with the same name already exists.
pub struct CreatePerson<S> {
  store: Arc<S>,
}

impl<S: PersonStore> CreatePerson<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Looks the name up first and fails with [`Error::AlreadyExists`] if it
  /// is taken. The lookup and the insert are separate store calls; a
  /// concurrent insert that wins the race is still reported as
  /// `AlreadyExists` because the store's unique constraint maps to it.
  pub async fn execute(&self, input: NewPerson) -> Result<Person> {
    let existing = self
      .store
      .find_by_name(&input.name)
      .await
      .map_err(store_err::<S>)?;
    if existing.is_some() {
      return Err(Error::AlreadyExists(input.name));
    }

    self.store.create(input).await.map_err(store_err::<S>)
  }
}

impl<S> Clone for CreatePerson<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

// ─── GetAllPersons ───────────────────────────────────────────────────────────

/// List every person, filtered and sorted as requested.
pub struct GetAllPersons<S> {
  store: Arc<S>,
}

impl<S: PersonStore> GetAllPersons<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn execute(&self, options: &ListOptions) -> Result<Vec<Person>> {
    self.store.find_all(options).await.map_err(store_err::<S>)
  }
}

impl<S> Clone for GetAllPersons<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

// ─── GetActivePersons ────────────────────────────────────────────────────────

/// List active persons as [`ActivePerson`] projections.
pub struct GetActivePersons<S> {
  store: Arc<S>,
}

impl<S: PersonStore> GetActivePersons<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// `retrieved_at` is read from the clock once, after the store returns,
  /// and stamped on every item.
  pub async fn execute(&self, sort: Option<Sort>) -> Result<Vec<ActivePerson>> {
    let persons = self
      .store
      .find_active(sort)
      .await
      .map_err(store_err::<S>)?;

    let retrieved_at = Utc::now();
    Ok(
      persons
        .into_iter()
        .map(|p| ActivePerson {
          name: p.name,
          favorite_movie: p.favorite_movie,
          retrieved_at,
        })
        .collect(),
    )
  }
}

impl<S> Clone for GetActivePersons<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
