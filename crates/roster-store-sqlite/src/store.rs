//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::{Path, PathBuf};

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  person::{ListOptions, NewPerson, Person, Sort, Status},
  store::PersonStore,
};

use crate::{
  Error, Result,
  encode::{
    PERSON_COLUMNS, RawPerson, encode_dt, encode_status, encode_uuid,
    sort_column, sort_direction,
  },
  schema::SCHEMA,
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where a store lives, parsed from a database URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Memory,
  File(PathBuf),
}

impl Location {
  /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
  /// `sqlite:<path>` or a bare path.
  pub fn parse(url: &str) -> Result<Self> {
    let url = url.trim();
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);

    match rest {
      "" => Err(Error::InvalidUrl(url.to_owned())),
      ":memory:" => Ok(Self::Memory),
      path => Ok(Self::File(PathBuf::from(path))),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite database.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the database named by `url` (see [`Location::parse`]).
  pub async fn connect(url: &str) -> Result<Self> {
    match Location::parse(url)? {
      Location::Memory => Self::open_in_memory().await,
      Location::File(path) => Self::open(path).await,
    }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Other clones of this store fail with
  /// a database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Shared query behind `find_all` and `find_active`.
  async fn select(
    &self,
    status: Option<Status>,
    sort: Option<Sort>,
  ) -> Result<Vec<Person>> {
    let status_str = status.map(encode_status);

    let mut sql = format!("SELECT {PERSON_COLUMNS} FROM persons");
    if status_str.is_some() {
      sql.push_str(" WHERE status = ?1");
    }
    if let Some(sort) = sort {
      sql.push_str(&format!(
        " ORDER BY {} {}",
        sort_column(sort.field),
        sort_direction(sort.order)
      ));
    }

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match status_str {
          Some(s) => stmt
            .query_map(rusqlite::params![s], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewPerson) -> Result<Person> {
    // Truncate to the stored precision so the returned record equals what a
    // later read decodes.
    let now = Utc::now().trunc_subsecs(6);
    let person = Person {
      id:             Uuid::new_v4(),
      name:           input.name,
      favorite_food:  input.favorite_food,
      favorite_movie: input.favorite_movie,
      status:         input.status,
      created_at:     now,
      updated_at:     now,
    };

    let id_str     = encode_uuid(person.id);
    let name       = person.name.clone();
    let food       = person.favorite_food.clone();
    let movie      = person.favorite_movie.clone();
    let status_str = encode_status(person.status);
    let at_str     = encode_dt(now);

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO persons (
             id, name, favorite_food, favorite_movie, status,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![id_str, name, food, movie, status_str, at_str],
        );
        match res {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      tracing::debug!(name = %person.name, "unique constraint rejected insert");
      return Err(Error::DuplicateName(person.name));
    }

    Ok(person)
  }

  async fn find_all(&self, options: &ListOptions) -> Result<Vec<Person>> {
    self.select(options.status, options.sort).await
  }

  async fn find_active(&self, sort: Option<Sort>) -> Result<Vec<Person>> {
    self.select(Some(Status::Active), sort).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1"),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn find_by_name(&self, name: &str) -> Result<Option<Person>> {
    let name = name.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE name = ?1"),
              rusqlite::params![name],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }
}
