//! Quiz round request types

use std::collections::HashSet;

use serde::Deserialize;

/// Category id the quiz front end sends for "All"
pub const ANY_CATEGORY_ID: i32 = 0;

/// Which questions a quiz round draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    /// Every category
    Any,
    /// A single category by id
    Only(i32),
}

impl From<i32> for QuizCategory {
    fn from(id: i32) -> Self {
        if id == ANY_CATEGORY_ID {
            Self::Any
        } else {
            Self::Only(id)
        }
    }
}

impl QuizCategory {
    /// Category filter to hand to the store (`None` = no filter).
    pub fn filter(self) -> Option<i32> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(id),
        }
    }
}

/// `quiz_category` accepts a bare id or a category object (`{"id": 5, "type": "Sports"}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i32),
    Object { id: i32 },
}

impl CategoryRef {
    pub fn id(&self) -> i32 {
        match self {
            Self::Id(id) | Self::Object { id } => *id,
        }
    }
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    #[serde(default)]
    pub quiz_category: Option<CategoryRef>,
}

impl QuizRequest {
    pub fn category(&self) -> QuizCategory {
        self.quiz_category
            .as_ref()
            .map_or(QuizCategory::Any, |c| QuizCategory::from(c.id()))
    }

    pub fn previous_ids(&self) -> HashSet<i32> {
        self.previous_questions.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_any() {
        assert_eq!(QuizCategory::from(0), QuizCategory::Any);
        assert_eq!(QuizCategory::from(5), QuizCategory::Only(5));
        assert_eq!(QuizCategory::Any.filter(), None);
        assert_eq!(QuizCategory::Only(5).filter(), Some(5));
    }

    #[test]
    fn parses_bare_id() {
        let req: QuizRequest =
            serde_json::from_str(r#"{"previous_questions": [4, 6], "quiz_category": 5}"#).unwrap();
        assert_eq!(req.category(), QuizCategory::Only(5));
        assert_eq!(req.previous_ids(), HashSet::from([4, 6]));
    }

    #[test]
    fn parses_category_object() {
        let req: QuizRequest = serde_json::from_str(
            r#"{"previous_questions": [], "quiz_category": {"type": "click", "id": 0}}"#,
        )
        .unwrap();
        assert_eq!(req.category(), QuizCategory::Any);
    }

    #[test]
    fn missing_fields_default_to_any_and_empty() {
        let req: QuizRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.category(), QuizCategory::Any);
        assert!(req.previous_ids().is_empty());
    }
}
