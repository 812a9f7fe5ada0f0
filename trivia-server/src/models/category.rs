//! Question categories

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categories seeded into an empty catalog
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// A question category. The display name travels as `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub name: String,
}
