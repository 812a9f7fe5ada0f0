//! In-memory question store
//!
//! Used by tests and by `trivia serve --in-memory`. Ids come from a
//! monotonic counter and are never reused after a delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{QuestionStore, StoreResult};
use crate::models::{Category, NewQuestion, Question, DEFAULT_CATEGORIES};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    /// Keyed by id, so iteration is already in id order
    questions: BTreeMap<i32, Question>,
    last_question_id: i32,
}

/// Question store holding everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given category names (ids 1..=n).
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: name.into(),
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                categories,
                ..Tables::default()
            }),
        }
    }

    /// Store pre-populated with the standard six categories.
    pub fn with_default_categories() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES)
    }

    /// Append a category and return it.
    pub async fn add_category(&self, name: impl Into<String>) -> Category {
        let mut tables = self.tables.write().await;
        let id = tables.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let category = Category {
            id,
            name: name.into(),
        };
        tables.categories.push(category.clone());
        category
    }

    pub async fn question_count(&self) -> usize {
        self.tables.read().await.questions.len()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool + Send,
    {
        self.tables
            .read()
            .await
            .questions
            .values()
            .filter(|&q| keep(q))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.tables.read().await.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn questions_in_category(&self, category_id: i32) -> StoreResult<Vec<Question>> {
        Ok(self.filtered(|q| q.category_id == category_id).await)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let needle = term.to_lowercase();
        Ok(self
            .filtered(|q| q.text.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i32> {
        let mut tables = self.tables.write().await;
        tables.last_question_id += 1;
        let id = tables.last_question_id;
        tables.questions.insert(
            id,
            Question {
                id,
                text: question.text,
                answer: question.answer,
                category_id: question.category_id,
                difficulty: question.difficulty,
            },
        );
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.questions.remove(&id).is_some())
    }

    async fn quiz_candidates(
        &self,
        exclude: &[i32],
        category_id: Option<i32>,
    ) -> StoreResult<Vec<Question>> {
        Ok(self
            .filtered(|q| {
                !exclude.contains(&q.id) && category_id.map_or(true, |c| q.category_id == c)
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, category_id: i32) -> NewQuestion {
        NewQuestion::new(text, "answer", 1, category_id).unwrap()
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryStore::new();
        let first = store.insert_question(question("First?", 1)).await.unwrap();
        assert!(store.delete_question(first).await.unwrap());

        let second = store.insert_question(question("Second?", 1)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::new();
        store
            .insert_question(question("Which river is longest?", 3))
            .await
            .unwrap();
        store
            .insert_question(question("Who wrote Hamlet?", 2))
            .await
            .unwrap();

        let upper = store.search_questions("WHICH").await.unwrap();
        let lower = store.search_questions("which").await.unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[tokio::test]
    async fn quiz_candidates_filter_category_and_exclusions() {
        let store = MemoryStore::new();
        let a = store.insert_question(question("A?", 5)).await.unwrap();
        let b = store.insert_question(question("B?", 5)).await.unwrap();
        store.insert_question(question("C?", 4)).await.unwrap();

        let pool = store.quiz_candidates(&[a], Some(5)).await.unwrap();
        assert_eq!(pool.iter().map(|q| q.id).collect::<Vec<_>>(), vec![b]);

        let any = store.quiz_candidates(&[a], None).await.unwrap();
        assert_eq!(any.len(), 2);
    }

    #[tokio::test]
    async fn default_categories_are_numbered_from_one() {
        let store = MemoryStore::with_default_categories();
        let categories = store.categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[5].name, "Sports");

        let extra = store.add_category("Music").await;
        assert_eq!(extra.id, 7);
    }
}
