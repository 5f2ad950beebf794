//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed number of
//! fractional digits and a `Z` suffix, so that string order equals time
//! order and `ORDER BY created_at` works. UUIDs are stored as hyphenated
//! lowercase strings. Status is stored as its display form.

use chrono::{DateTime, SecondsFormat, Utc};
use roster_core::person::{Person, SortField, SortOrder, Status};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<Status> { Ok(s.parse()?) }

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Column for a sort field. Only these fixed names are ever interpolated
/// into SQL.
pub fn sort_column(f: SortField) -> &'static str {
  match f {
    SortField::Name => "name",
    SortField::FavoriteFood => "favorite_food",
    SortField::FavoriteMovie => "favorite_movie",
    SortField::CreatedAt => "created_at",
    SortField::UpdatedAt => "updated_at",
  }
}

pub fn sort_direction(o: SortOrder) -> &'static str {
  match o {
    SortOrder::Asc => "ASC",
    SortOrder::Desc => "DESC",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str =
  "id, name, favorite_food, favorite_movie, status, created_at, updated_at";

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub id:             String,
  pub name:           String,
  pub favorite_food:  String,
  pub favorite_movie: String,
  pub status:         String,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPerson {
      id:             row.get(0)?,
      name:           row.get(1)?,
      favorite_food:  row.get(2)?,
      favorite_movie: row.get(3)?,
      status:         row.get(4)?,
      created_at:     row.get(5)?,
      updated_at:     row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:             decode_uuid(&self.id)?,
      name:           self.name,
      favorite_food:  self.favorite_food,
      favorite_movie: self.favorite_movie,
      status:         decode_status(&self.status)?,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
