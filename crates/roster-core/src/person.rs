//! Person records and the query options used to list them.
//!
//! A person is written once through the create use case and never updated
//! through this API; `created_at` and `updated_at` are both assigned by the
//! store.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether a person record is currently active. No other states exist.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Status {
  #[default]
  Active,
  Inactive,
}

impl Status {
  pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Inactive => "Inactive",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Status {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|st| st.as_str() == s)
      .ok_or_else(|| Error::UnknownStatus(s.to_owned()))
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:             Uuid,
  /// Unique across the store.
  pub name:           String,
  pub favorite_food:  String,
  pub favorite_movie: String,
  pub status:         Status,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Validated input to [`crate::store::PersonStore::create`].
/// `id` and the timestamps are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:           String,
  pub favorite_food:  String,
  pub favorite_movie: String,
  pub status:         Status,
}

impl NewPerson {
  /// Convenience constructor with `status` defaulted to [`Status::Active`].
  pub fn new(
    name: impl Into<String>,
    favorite_food: impl Into<String>,
    favorite_movie: impl Into<String>,
  ) -> Self {
    Self {
      name:           name.into(),
      favorite_food:  favorite_food.into(),
      favorite_movie: favorite_movie.into(),
      status:         Status::default(),
    }
  }

  pub fn with_status(mut self, status: Status) -> Self {
    self.status = status;
    self
  }
}

/// The reduced projection returned for active persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePerson {
  pub name:           String,
  pub favorite_movie: String,
  /// When the batch containing this record was read; identical for every
  /// item of one response.
  pub retrieved_at:   DateTime<Utc>,
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Fields a listing may be ordered by. The string forms are the camelCase
/// JSON field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  Name,
  FavoriteFood,
  FavoriteMovie,
  CreatedAt,
  UpdatedAt,
}

impl SortField {
  pub const ALL: [SortField; 5] = [
    SortField::Name,
    SortField::FavoriteFood,
    SortField::FavoriteMovie,
    SortField::CreatedAt,
    SortField::UpdatedAt,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::FavoriteFood => "favoriteFood",
      Self::FavoriteMovie => "favoriteMovie",
      Self::CreatedAt => "createdAt",
      Self::UpdatedAt => "updatedAt",
    }
  }
}

impl FromStr for SortField {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|f| f.as_str() == s)
      .ok_or_else(|| Error::UnknownSortField(s.to_owned()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  pub const ALL: [SortOrder; 2] = [SortOrder::Asc, SortOrder::Desc];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Asc => "asc",
      Self::Desc => "desc",
    }
  }
}

impl FromStr for SortOrder {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|o| o.as_str() == s)
      .ok_or_else(|| Error::UnknownSortOrder(s.to_owned()))
  }
}

/// An explicit ordering. Without one, rows come back in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
  pub field: SortField,
  pub order: SortOrder,
}

impl Sort {
  pub fn asc(field: SortField) -> Self {
    Self { field, order: SortOrder::Asc }
  }

  pub fn desc(field: SortField) -> Self {
    Self { field, order: SortOrder::Desc }
  }
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::PersonStore::find_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
  /// Restrict to persons with this status.
  pub status: Option<Status>,
  pub sort:   Option<Sort>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_serializes_capitalised() {
    assert_eq!(
      serde_json::to_string(&Status::Inactive).unwrap(),
      "\"Inactive\""
    );
    assert_eq!("Active".parse::<Status>().unwrap(), Status::Active);
    assert!("active".parse::<Status>().is_err());
  }

  #[test]
  fn person_uses_camel_case_keys() {
    let now = Utc::now();
    let person = Person {
      id:             Uuid::new_v4(),
      name:           "Matt".into(),
      favorite_food:  "Brisket Tacos".into(),
      favorite_movie: "The Princess Bride".into(),
      status:         Status::Active,
      created_at:     now,
      updated_at:     now,
    };
    let json = serde_json::to_value(&person).unwrap();
    let obj = json.as_object().unwrap();
    for key in [
      "id",
      "name",
      "favoriteFood",
      "favoriteMovie",
      "status",
      "createdAt",
      "updatedAt",
    ] {
      assert!(obj.contains_key(key), "missing {key}: {json}");
    }
    assert_eq!(obj.len(), 7);
  }

  #[test]
  fn sort_field_parses_json_names_only() {
    assert_eq!(
      "favoriteMovie".parse::<SortField>().unwrap(),
      SortField::FavoriteMovie
    );
    assert!("favorite_movie".parse::<SortField>().is_err());
    assert!("id".parse::<SortField>().is_err());
  }
}
