//! Question catalog service
//!
//! Stateless between calls: every operation reads what it needs from the
//! injected [`QuestionStore`] and applies the paging and not-found policies
//! below.
//!
//! - `list_questions` is `NotFound` when the *requested page* is empty.
//! - `list_by_category` is `NotFound` when the *whole category* is empty;
//!   a page past its end is an empty success.
//! - `search_questions` never reports `NotFound`, and its count is the size
//!   of the returned page.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::db::QuestionStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, NewQuestion, Pagination, Question, QuestionDraft, QuizCategory};

/// One page of the full question list
#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    /// Size of the whole collection
    pub total: usize,
    pub categories: Vec<Category>,
}

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub questions: Vec<Question>,
    /// Number of questions on this page, not the total match count
    pub count: usize,
}

/// One page of a single category
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub questions: Vec<Question>,
    /// Size of the unpaginated category
    pub total: usize,
    pub category_id: i32,
}

/// Catalog service over an injected store
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn QuestionStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn QuestionStore {
        self.store.as_ref()
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.store.categories().await?)
    }

    pub async fn list_questions(&self, page: Pagination) -> CatalogResult<QuestionPage> {
        let all = self.store.questions().await?;
        let questions = page.slice(&all);
        tracing::debug!(page = page.page, total = all.len(), "listing questions");

        if questions.is_empty() {
            return Err(CatalogError::not_found(format!("question page {}", page.page)));
        }

        Ok(QuestionPage {
            questions,
            total: all.len(),
            categories: self.store.categories().await?,
        })
    }

    pub async fn search_questions(&self, term: &str, page: Pagination) -> CatalogResult<SearchPage> {
        let matches = self
            .store
            .search_questions(term)
            .await
            .map_err(CatalogError::unprocessable)?;
        let questions = page.slice(&matches);
        tracing::debug!(term, matches = matches.len(), page = page.page, "searched questions");

        Ok(SearchPage {
            count: questions.len(),
            questions,
        })
    }

    pub async fn list_by_category(
        &self,
        category_id: i32,
        page: Pagination,
    ) -> CatalogResult<CategoryPage> {
        let in_category = self.store.questions_in_category(category_id).await?;
        if in_category.is_empty() {
            return Err(CatalogError::not_found(format!(
                "questions in category {category_id}"
            )));
        }

        Ok(CategoryPage {
            questions: page.slice(&in_category),
            total: in_category.len(),
            category_id,
        })
    }

    pub async fn create_question(&self, draft: QuestionDraft) -> CatalogResult<i32> {
        let question = NewQuestion::try_from(draft).map_err(CatalogError::unprocessable)?;
        let id = self
            .store
            .insert_question(question)
            .await
            .map_err(CatalogError::unprocessable)?;

        tracing::info!(id, "created question");
        Ok(id)
    }

    pub async fn delete_question(&self, id: i32) -> CatalogResult<i32> {
        let existing = self
            .store
            .find_question(id)
            .await
            .map_err(|e| CatalogError::BadRequest(e.to_string()))?;

        if existing.is_none() {
            return Err(CatalogError::not_found(format!("question {id}")));
        }

        // A concurrent delete can win between the lookup and here.
        let deleted = self
            .store
            .delete_question(id)
            .await
            .map_err(CatalogError::unprocessable)?;
        if !deleted {
            return Err(CatalogError::not_found(format!("question {id}")));
        }

        tracing::info!(id, "deleted question");
        Ok(id)
    }

    /// Pick a random question the player has not seen yet.
    pub async fn next_quiz_question(
        &self,
        previous_ids: &HashSet<i32>,
        category: QuizCategory,
    ) -> CatalogResult<Question> {
        let mut exclude: Vec<i32> = previous_ids.iter().copied().collect();
        exclude.sort_unstable();

        let pool = self
            .store
            .quiz_candidates(&exclude, category.filter())
            .await?;
        tracing::debug!(candidates = pool.len(), ?category, "drawing quiz question");

        pool.choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| CatalogError::not_found("unseen quiz question"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    fn draft(text: &str, category: i32) -> QuestionDraft {
        QuestionDraft {
            question: Some(json!(text)),
            answer: Some(json!("answer")),
            difficulty: Some(json!(1)),
            category: Some(json!(category)),
        }
    }

    async fn catalog_with(questions: &[(&str, i32)]) -> Catalog {
        let catalog = Catalog::new(Arc::new(MemoryStore::with_default_categories()));
        for (text, category) in questions {
            catalog.create_question(draft(text, *category)).await.unwrap();
        }
        catalog
    }

    async fn numbered_catalog(n: usize) -> Catalog {
        let texts: Vec<String> = (1..=n).map(|i| format!("Question number {i}?")).collect();
        let rows: Vec<(&str, i32)> = texts.iter().map(|t| (t.as_str(), 1)).collect();
        catalog_with(&rows).await
    }

    /// Store whose every call fails
    struct FailingStore;

    fn down() -> StoreError {
        StoreError::Sqlx(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl QuestionStore for FailingStore {
        async fn ping(&self) -> StoreResult<()> {
            Err(down())
        }
        async fn categories(&self) -> StoreResult<Vec<Category>> {
            Err(down())
        }
        async fn questions(&self) -> StoreResult<Vec<Question>> {
            Err(down())
        }
        async fn questions_in_category(&self, _: i32) -> StoreResult<Vec<Question>> {
            Err(down())
        }
        async fn search_questions(&self, _: &str) -> StoreResult<Vec<Question>> {
            Err(down())
        }
        async fn find_question(&self, _: i32) -> StoreResult<Option<Question>> {
            Err(down())
        }
        async fn insert_question(&self, _: NewQuestion) -> StoreResult<i32> {
            Err(down())
        }
        async fn delete_question(&self, _: i32) -> StoreResult<bool> {
            Err(down())
        }
        async fn quiz_candidates(&self, _: &[i32], _: Option<i32>) -> StoreResult<Vec<Question>> {
            Err(down())
        }
    }

    #[tokio::test]
    async fn list_questions_pages_and_counts_everything() {
        let catalog = numbered_catalog(23).await;

        let first = catalog.list_questions(Pagination::new(1)).await.unwrap();
        assert_eq!(first.questions.len(), 10);
        assert_eq!(first.total, 23);
        assert_eq!(first.categories.len(), 6);

        let last = catalog.list_questions(Pagination::new(3)).await.unwrap();
        assert_eq!(last.questions.len(), 3);
        assert_eq!(last.questions[0].id, 21);
    }

    #[tokio::test]
    async fn list_questions_past_last_page_is_not_found() {
        let catalog = numbered_catalog(23).await;
        for page in [4, 5, 1000] {
            let err = catalog.list_questions(Pagination::new(page)).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound(_)), "page {page}");
        }
    }

    #[tokio::test]
    async fn list_questions_on_empty_catalog_is_not_found() {
        let catalog = catalog_with(&[]).await;
        let err = catalog.list_questions(Pagination::new(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_search_matches_whole_catalog() {
        let catalog = numbered_catalog(8).await;

        let all = catalog.list_questions(Pagination::new(1)).await.unwrap();
        let found = catalog.search_questions("", Pagination::new(1)).await.unwrap();
        assert_eq!(found.questions, all.questions);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let catalog = catalog_with(&[
            ("Which is the only team to play in every soccer World Cup?", 6),
            ("Who invented Peanut Butter?", 4),
            ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 4),
            ("which bird lays the largest egg?", 1),
        ])
        .await;

        let upper = catalog.search_questions("WHICH", Pagination::new(1)).await.unwrap();
        let lower = catalog.search_questions("which", Pagination::new(1)).await.unwrap();
        assert_eq!(upper.questions, lower.questions);
        assert_eq!(
            upper.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 4]
        );
    }

    #[tokio::test]
    async fn search_count_is_page_size() {
        let catalog = numbered_catalog(15).await;

        let second = catalog.search_questions("question", Pagination::new(2)).await.unwrap();
        assert_eq!(second.count, 5);
        assert_eq!(second.questions.len(), 5);

        let beyond = catalog.search_questions("question", Pagination::new(9)).await.unwrap();
        assert_eq!(beyond.count, 0);
    }

    #[tokio::test]
    async fn list_by_category_filters_and_orders() {
        let catalog = catalog_with(&[("A?", 5), ("B?", 2), ("C?", 5)]).await;

        let page = catalog.list_by_category(5, Pagination::new(1)).await.unwrap();
        assert_eq!(page.category_id, 5);
        assert_eq!(page.total, 2);
        assert_eq!(
            page.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn empty_category_is_not_found_on_any_page() {
        let catalog = catalog_with(&[("A?", 5)]).await;
        for page in [1, 2, 50] {
            let err = catalog
                .list_by_category(500, Pagination::new(page))
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn category_page_past_end_is_empty_success() {
        let catalog = catalog_with(&[("A?", 5)]).await;
        let page = catalog.list_by_category(5, Pagination::new(2)).await.unwrap();
        assert!(page.questions.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn create_requires_every_field() {
        let catalog = catalog_with(&[]).await;

        let mut incomplete = draft("Q?", 1);
        incomplete.category = None;
        let err = catalog.create_question(incomplete).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unprocessable(_)));

        let err = catalog
            .create_question(QuestionDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn create_returns_fresh_ids() {
        let catalog = catalog_with(&[]).await;
        let mut seen = HashSet::new();
        for i in 0..5 {
            let id = catalog.create_question(draft(&format!("Q{i}?"), 1)).await.unwrap();
            assert!(seen.insert(id));
        }
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let catalog = catalog_with(&[("A?", 1)]).await;

        assert_eq!(catalog.delete_question(1).await.unwrap(), 1);
        let err = catalog.delete_question(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let err = catalog.delete_question(2000).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn quiz_never_repeats_or_leaves_category() {
        let catalog = catalog_with(&[
            ("A?", 5),
            ("B?", 4),
            ("C?", 5),
            ("D?", 5),
            ("E?", 2),
            ("F?", 5),
        ])
        .await;
        let previous = HashSet::from([4, 6]);

        for _ in 0..50 {
            let q = catalog
                .next_quiz_question(&previous, QuizCategory::Only(5))
                .await
                .unwrap();
            assert!(!previous.contains(&q.id));
            assert_eq!(q.category_id, 5);
        }
    }

    #[tokio::test]
    async fn quiz_pool_of_one_is_deterministic() {
        let catalog = catalog_with(&[("A?", 5), ("B?", 5), ("C?", 3)]).await;
        let previous = HashSet::from([1]);

        for _ in 0..10 {
            let q = catalog
                .next_quiz_question(&previous, QuizCategory::Only(5))
                .await
                .unwrap();
            assert_eq!(q.id, 2);
        }
    }

    #[tokio::test]
    async fn quiz_empty_pool_is_not_found() {
        let catalog = catalog_with(&[("A?", 5), ("B?", 3)]).await;

        let err = catalog
            .next_quiz_question(&HashSet::from([1]), QuizCategory::Only(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let err = catalog
            .next_quiz_question(&HashSet::new(), QuizCategory::Only(500))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn quiz_any_category_spans_catalog() {
        let catalog = catalog_with(&[("A?", 5), ("B?", 3)]).await;
        let q = catalog
            .next_quiz_question(&HashSet::from([1]), QuizCategory::Any)
            .await
            .unwrap();
        assert_eq!(q.id, 2);
    }

    #[tokio::test]
    async fn store_failures_map_by_operation() {
        let catalog = Catalog::new(Arc::new(FailingStore));

        assert!(matches!(
            catalog.list_categories().await.unwrap_err(),
            CatalogError::Store(_)
        ));
        assert!(matches!(
            catalog.create_question(draft("Q?", 1)).await.unwrap_err(),
            CatalogError::Unprocessable(_)
        ));
        assert!(matches!(
            catalog.search_questions("x", Pagination::new(1)).await.unwrap_err(),
            CatalogError::Unprocessable(_)
        ));
        assert!(matches!(
            catalog.delete_question(1).await.unwrap_err(),
            CatalogError::BadRequest(_)
        ));
    }
}
