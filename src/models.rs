use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile row, created once at registration and never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// Category row; owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
}

/// Note row. `category_id` is nullable and dropped (not cascaded) when its
/// category is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub is_important: bool,
    pub created_at: DateTime<Utc>,
}

/// The `name,color` slice of a category embedded in a note row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub color: String,
}

/// Note row with its embedded category, as returned by
/// `select=*,categories(name,color)`. The embed is null for uncategorized
/// notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteWithCategory {
    #[serde(flatten)]
    pub note: Note,
    #[serde(default)]
    pub categories: Option<CategoryRef>,
}

/// One row of an embedded count aggregate (`notes(count)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRow {
    pub count: i64,
}

/// Category row with its per-category note count, as returned by
/// `select=*,notes(count)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub notes: Vec<CountRow>,
}

impl CategoryWithCount {
    pub fn note_count(&self) -> i64 {
        self.notes.first().map(|row| row.count).unwrap_or(0)
    }
}

/// Insert payload for a note. `category_id` is left out of the wire payload
/// entirely when the form did not pick a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub is_important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

/// Insert payload for a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
}

/// Insert payload for a profile; `id` equals the remote user id.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// The four categories every fresh account starts with.
pub fn default_categories(user_id: Uuid) -> Vec<NewCategory> {
    [
        ("Personal", "#3498db"),
        ("Work", "#e74c3c"),
        ("Ideas", "#9b59b6"),
        ("Important", "#f39c12"),
    ]
    .into_iter()
    .map(|(name, color)| NewCategory {
        name: name.to_string(),
        color: color.to_string(),
        user_id,
    })
    .collect()
}
