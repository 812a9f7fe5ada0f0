//! Question records and creation drafts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// A stored trivia question.
///
/// Serialized with the field names the quiz front end expects
/// (`question`, `category`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    #[serde(rename = "question")]
    #[sqlx(rename = "question")]
    pub text: String,
    pub answer: String,
    #[serde(rename = "category")]
    #[sqlx(rename = "category")]
    pub category_id: i32,
    pub difficulty: i32,
}

/// Body of `POST /questions` when creating.
///
/// Fields are kept as raw JSON so that a missing or wrong-typed field
/// surfaces as a validation failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionDraft {
    pub question: Option<Value>,
    pub answer: Option<Value>,
    pub difficulty: Option<Value>,
    pub category: Option<Value>,
}

fn required(value: Option<Value>, field: &'static str) -> Result<Value, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(value) => Ok(value),
    }
}

fn text_field(value: Option<Value>, field: &'static str) -> Result<String, ValidationError> {
    match required(value, field)? {
        Value::String(s) => Ok(s),
        _ => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// Integers arrive as JSON numbers or, from form-backed clients, as numeric strings.
fn int_field(value: Option<Value>, field: &'static str) -> Result<i32, ValidationError> {
    let parsed = match required(value, field)? {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or(ValidationError::InvalidType {
        field,
        expected: "an integer",
    })
}

/// A validated question ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub difficulty: i32,
    pub category_id: i32,
}

impl NewQuestion {
    /// Create a new question, validating required fields.
    ///
    /// # Rules
    /// - All four fields must be present
    /// - Question text must not be blank
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
        difficulty: i32,
        category_id: i32,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::Empty { field: "question" });
        }

        Ok(Self {
            text,
            answer: answer.into(),
            difficulty,
            category_id,
        })
    }
}

impl TryFrom<QuestionDraft> for NewQuestion {
    type Error = ValidationError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        let text = text_field(draft.question, "question")?;
        let answer = text_field(draft.answer, "answer")?;
        let difficulty = int_field(draft.difficulty, "difficulty")?;
        let category_id = int_field(draft.category, "category")?;

        Self::new(text, answer, difficulty, category_id)
    }
}
