//! Domain models with validation at construction
//!
//! Drafts coming off the wire are validated when converted into
//! these types. Invalid input returns ValidationError, not panic.

pub mod category;
pub mod pagination;
pub mod question;
pub mod quiz;
pub mod validation;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use pagination::{PageParams, Pagination, QUESTIONS_PER_PAGE};
pub use question::{NewQuestion, Question, QuestionDraft};
pub use quiz::{CategoryRef, QuizCategory, QuizRequest, ANY_CATEGORY_ID};
pub use validation::ValidationError;
