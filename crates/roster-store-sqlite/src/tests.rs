//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::PathBuf;

use roster_core::{
  person::{ListOptions, NewPerson, Sort, SortField, Status},
  store::PersonStore,
  usecase::CreatePerson,
};
use uuid::Uuid;

use crate::{Location, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn person(name: &str, status: Status) -> NewPerson {
  NewPerson::new(name, format!("{name} food"), format!("{name} movie"))
    .with_status(status)
}

fn names(people: &[roster_core::person::Person]) -> Vec<&str> {
  people.iter().map(|p| p.name.as_str()).collect()
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_by_id() {
  let s = store().await;

  let created = s
    .create(NewPerson::new("Matt", "Brisket Tacos", "The Princess Bride"))
    .await
    .unwrap();
  assert_eq!(created.status, Status::Active);
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.find_by_id(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn create_keeps_explicit_status() {
  let s = store().await;
  let created = s.create(person("Rocky", Status::Inactive)).await.unwrap();
  assert_eq!(created.status, Status::Inactive);

  let fetched = s.find_by_name("Rocky").await.unwrap().unwrap();
  assert_eq!(fetched.status, Status::Inactive);
}

#[tokio::test]
async fn create_duplicate_name_is_rejected_by_constraint() {
  let s = store().await;
  s.create(person("Donny", Status::Active)).await.unwrap();

  let err = s.create(person("Donny", Status::Inactive)).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateName(ref n) if n == "Donny"));

  let core: roster_core::Error = err.into();
  assert!(matches!(core, roster_core::Error::AlreadyExists(_)));

  let all = s.find_all(&ListOptions::default()).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn create_person_use_case_over_sqlite() {
  let s = std::sync::Arc::new(store().await);
  let uc = CreatePerson::new(s.clone());

  uc.execute(person("Miroslav", Status::Active)).await.unwrap();
  let err = uc
    .execute(person("Miroslav", Status::Active))
    .await
    .unwrap_err();
  assert!(err.to_string().contains("already exists"), "{err}");
  assert_eq!(s.find_all(&ListOptions::default()).await.unwrap().len(), 1);
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lookups_return_none_when_missing() {
  let s = store().await;
  assert!(s.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.find_by_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn find_by_name_is_exact() {
  let s = store().await;
  s.create(person("TestActive2", Status::Active)).await.unwrap();
  assert!(s.find_by_name("TestActive").await.unwrap().is_none());
  assert!(s.find_by_name("TestActive2").await.unwrap().is_some());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.create(person("B", Status::Inactive)).await.unwrap();
  s.create(person("A", Status::Active)).await.unwrap();
  s.create(person("C", Status::Active)).await.unwrap();
  s
}

#[tokio::test]
async fn find_all_filters_by_status() {
  let s = seeded().await;

  let all = s.find_all(&ListOptions::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let active = s
    .find_all(&ListOptions { status: Some(Status::Active), sort: None })
    .await
    .unwrap();
  assert_eq!(active.len(), 2);
  assert!(active.iter().all(|p| p.status == Status::Active));

  let inactive = s
    .find_all(&ListOptions { status: Some(Status::Inactive), sort: None })
    .await
    .unwrap();
  assert_eq!(names(&inactive), ["B"]);
}

#[tokio::test]
async fn find_all_sorts_both_directions() {
  let s = seeded().await;

  let asc = s
    .find_all(&ListOptions { status: None, sort: Some(Sort::asc(SortField::Name)) })
    .await
    .unwrap();
  assert_eq!(names(&asc), ["A", "B", "C"]);

  let desc = s
    .find_all(&ListOptions {
      status: None,
      sort:   Some(Sort::desc(SortField::Name)),
    })
    .await
    .unwrap();
  assert_eq!(names(&desc), ["C", "B", "A"]);
}

#[tokio::test]
async fn find_all_sorts_by_creation_time() {
  let s = seeded().await;

  let by_created = s
    .find_all(&ListOptions {
      status: None,
      sort:   Some(Sort::asc(SortField::CreatedAt)),
    })
    .await
    .unwrap();
  assert!(by_created.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[tokio::test]
async fn find_active_ignores_inactive() {
  let s = seeded().await;

  let active = s
    .find_active(Some(Sort::desc(SortField::Name)))
    .await
    .unwrap();
  assert_eq!(names(&active), ["C", "A"]);
}

#[tokio::test]
async fn find_active_empty() {
  let s = store().await;
  s.create(person("B", Status::Inactive)).await.unwrap();
  assert!(s.find_active(None).await.unwrap().is_empty());
}

// ─── Location / connect ──────────────────────────────────────────────────────

#[test]
fn location_parses_supported_urls() {
  assert_eq!(Location::parse("sqlite::memory:").unwrap(), Location::Memory);
  assert_eq!(Location::parse(":memory:").unwrap(), Location::Memory);
  assert_eq!(
    Location::parse("sqlite://data/roster.db").unwrap(),
    Location::File(PathBuf::from("data/roster.db"))
  );
  assert_eq!(
    Location::parse("sqlite:roster.db").unwrap(),
    Location::File(PathBuf::from("roster.db"))
  );
  assert_eq!(
    Location::parse("/var/lib/roster.db").unwrap(),
    Location::File(PathBuf::from("/var/lib/roster.db"))
  );
  assert!(Location::parse("  ").is_err());
  assert!(Location::parse("sqlite://").is_err());
}

#[tokio::test]
async fn connect_in_memory_and_close() {
  let s = SqliteStore::connect("sqlite::memory:").await.unwrap();
  s.create(person("A", Status::Active)).await.unwrap();
  s.close().await.unwrap();
}
