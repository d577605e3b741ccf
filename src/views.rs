//! Typed page payloads. Every view carries the consumed flash message, if
//! one was pending; form views additionally carry an `error` plus the
//! submitted input worth preserving.

use serde::Serialize;
use uuid::Uuid;

use crate::flash::Flash;
use crate::models::{Category, CategoryWithCount, NoteWithCategory};

#[derive(Debug, Serialize)]
pub struct LoginView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Submitted address, preserved on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl LoginView {
    pub fn new(flash: Option<Flash>) -> Self {
        Self { flash, error: None, email: None }
    }

    pub fn failed(error: String, email: String) -> Self {
        Self { flash: None, error: Some(error), email: Some(email) }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterView {
    pub fn new(flash: Option<Flash>) -> Self {
        Self { flash, error: None, email: None, full_name: None }
    }

    pub fn failed(error: String, email: String, full_name: String) -> Self {
        Self {
            flash: None,
            error: Some(error),
            email: Some(email),
            full_name: Some(full_name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub recent_notes: Vec<NoteWithCategory>,
    pub categories: Vec<Category>,
    pub total_notes: i64,
    pub important_notes_count: i64,
}

#[derive(Debug, Serialize)]
pub struct NotesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub notes: Vec<NoteWithCategory>,
    pub categories: Vec<Category>,
    pub current_category: String,
}

#[derive(Debug, Serialize)]
pub struct ImportantNotesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub notes: Vec<NoteWithCategory>,
}

#[derive(Debug, Serialize)]
pub struct AddNoteView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub notes: Vec<NoteWithCategory>,
    pub categories: Vec<Category>,
    pub search_query: String,
}

/// Category plus its note count, flattened for the categories page.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub note_count: i64,
}

impl From<CategoryWithCount> for CategorySummary {
    fn from(row: CategoryWithCount) -> Self {
        let note_count = row.note_count();
        Self {
            id: row.category.id,
            name: row.category.name,
            color: row.category.color,
            note_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub categories: Vec<CategorySummary>,
}
