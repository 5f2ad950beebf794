//! Sample data for local development.
//!
//! Seeding goes through [`CreatePerson`], so existing names are skipped
//! rather than overwritten and running it twice is harmless.

use roster_core::{
  Error,
  person::{NewPerson, Status},
  store::PersonStore,
  usecase::CreatePerson,
};

/// `(name, favorite food, favorite movie, status)`
pub const SAMPLE_PEOPLE: &[(&str, &str, &str, Status)] = &[
  ("Rocky", "Sushi", "Back to The Future", Status::Inactive),
  ("Miroslav", "Sushi", "American Psycho", Status::Active),
  ("Donny", "Singapore chow mei fun", "The Princess Bride", Status::Inactive),
  ("Matt", "Brisket Tacos", "The Princess Bride", Status::Active),
  ("Priya", "Pizza", "Inception", Status::Active),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
  pub created: usize,
  pub skipped: usize,
}

pub async fn seed<S: PersonStore>(
  create: &CreatePerson<S>,
) -> Result<SeedReport, Error> {
  let mut report = SeedReport::default();

  for &(name, food, movie, status) in SAMPLE_PEOPLE {
    match create
      .execute(NewPerson::new(name, food, movie).with_status(status))
      .await
    {
      Ok(person) => {
        tracing::info!(id = %person.id, name, "seeded person");
        report.created += 1;
      }
      Err(Error::AlreadyExists(_)) => {
        tracing::debug!(name, "person already present, skipping");
        report.skipped += 1;
      }
      Err(e) => return Err(e),
    }
  }

  Ok(report)
}
