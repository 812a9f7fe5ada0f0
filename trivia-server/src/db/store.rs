//! The question store seam
//!
//! The catalog talks to persistence only through [`QuestionStore`], so the
//! PostgreSQL store and the in-memory store are interchangeable.

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the catalog relies on.
///
/// Every list operation returns questions in ascending id order.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> StoreResult<()>;

    /// All categories, ascending id.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    /// The whole question collection.
    async fn questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions whose category equals `category_id`.
    async fn questions_in_category(&self, category_id: i32) -> StoreResult<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>>;

    /// Insert and return the store-assigned id.
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i32>;

    /// Returns false when nothing was deleted.
    async fn delete_question(&self, id: i32) -> StoreResult<bool>;

    /// Questions not in `exclude`, optionally restricted to one category.
    async fn quiz_candidates(
        &self,
        exclude: &[i32],
        category_id: Option<i32>,
    ) -> StoreResult<Vec<Question>>;
}
