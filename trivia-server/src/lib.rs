//! trivia-server: HTTP API over a trivia question bank
//!
//! Lists categories and questions, searches, creates and deletes
//! questions, and serves random unseen questions for quiz rounds.

pub mod catalog;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
