//! PostgreSQL question store
//!
//! Filtering happens in SQL; every list query orders by id so that
//! pagination in the catalog is stable.

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{QuestionStore, StoreResult};
use crate::models::{Category, NewQuestion, Question};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Question store backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Escape LIKE metacharacters so the term matches as a plain substring.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id");
        let rows = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn questions_in_category(&self, category_id: i32) -> StoreResult<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let sql = format!(
            r"SELECT {QUESTION_COLUMNS} FROM questions WHERE question ILIKE $1 ESCAPE '\' ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&question.text)
        .bind(&question.answer)
        .bind(question.category_id)
        .bind(question.difficulty)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn quiz_candidates(
        &self,
        exclude: &[i32],
        category_id: Option<i32>,
    ) -> StoreResult<Vec<Question>> {
        let sql = format!(
            r#"
            SELECT {QUESTION_COLUMNS} FROM questions
            WHERE ($1::INTEGER IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY id
            "#
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(category_id)
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("which"), "%which%");
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(""), "%%");
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool, true)
            .await
            .expect("migrations failed");
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_find_delete() {
        let store = store().await;
        let new = NewQuestion::new("Which metal is liquid at room temperature?", "Mercury", 2, 1)
            .unwrap();

        let id = store.insert_question(new).await.unwrap();
        let found = store.find_question(id).await.unwrap().unwrap();
        assert_eq!(found.answer, "Mercury");

        let hits = store.search_questions("LIQUID AT ROOM").await.unwrap();
        assert!(hits.iter().any(|q| q.id == id));

        assert!(store.delete_question(id).await.unwrap());
        assert!(!store.delete_question(id).await.unwrap());
        assert!(store.find_question(id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn quiz_candidates_respect_exclusions() {
        let store = store().await;
        let a = store
            .insert_question(NewQuestion::new("Quiz candidate A?", "A", 1, 4).unwrap())
            .await
            .unwrap();
        let b = store
            .insert_question(NewQuestion::new("Quiz candidate B?", "B", 1, 4).unwrap())
            .await
            .unwrap();

        let pool = store.quiz_candidates(&[a], Some(4)).await.unwrap();
        assert!(pool.iter().all(|q| q.id != a && q.category_id == 4));
        assert!(pool.iter().any(|q| q.id == b));

        store.delete_question(a).await.unwrap();
        store.delete_question(b).await.unwrap();
    }
}
