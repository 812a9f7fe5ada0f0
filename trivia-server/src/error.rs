//! Error types for trivia-server

use thiserror::Error;

use crate::db::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures surfaced by the question catalog.
///
/// Only `Store` carries a cause; the other kinds are policy outcomes the
/// HTTP layer maps straight to a status code.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Collapse any failure on a write path into `Unprocessable`.
    pub fn unprocessable(cause: impl std::fmt::Display) -> Self {
        Self::Unprocessable(cause.to_string())
    }
}
