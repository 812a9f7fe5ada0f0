//! Question endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, PageQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{Category, Question, QuestionDraft};

/// `POST /questions` body: a search when `searchTerm` is non-empty, a create otherwise
#[derive(Debug, Deserialize)]
pub struct QuestionsPostRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub draft: QuestionDraft,
}

impl QuestionsPostRequest {
    fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|t| !t.is_empty())
    }
}

/// Paginated question list
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i32>,
    pub categories: Vec<Category>,
}

/// Search results
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i32>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

/// GET /questions - all questions, paginated
async fn list_questions(
    State(state): State<Arc<AppState>>,
    PageQuery(page): PageQuery,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let page = state.catalog.list_questions(page).await?;

    Ok(Json(QuestionsResponse {
        success: true,
        current_category: page.questions.first().map(|q| q.category_id),
        questions: page.questions,
        total_questions: page.total,
        categories: page.categories,
    }))
}

/// POST /questions - search or create
async fn post_questions(
    State(state): State<Arc<AppState>>,
    PageQuery(page): PageQuery,
    JsonBody(req): JsonBody<QuestionsPostRequest>,
) -> Result<Response, ApiError> {
    if let Some(term) = req.search_term() {
        let found = state
            .catalog
            .search_questions(term, page)
            .await?;

        return Ok(Json(SearchResponse {
            success: true,
            questions: found.questions,
            total_questions: found.count,
            current_category: None,
        })
        .into_response());
    }

    let id = state.catalog.create_question(req.draft).await?;
    Ok(Json(CreatedResponse {
        success: true,
        created: id,
    })
    .into_response())
}

/// DELETE /questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.catalog.delete_question(id).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted,
    }))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
}
