//! Core types, the store trait and the use cases for the Roster person API.
//!
//! No HTTP or database dependencies; every other crate depends on this one.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod person;
pub mod store;
pub mod usecase;

pub use error::{Error, Result};
