// handlers/notes/add.rs - GET/POST /add-note

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::flash::{self, FlashLevel};
use crate::models::{Category, NewNote};
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views::AddNoteView;

#[derive(Debug, Deserialize)]
pub struct AddNoteForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Checkbox: present when ticked, absent otherwise.
    #[serde(default)]
    pub is_important: Option<String>,
}

/// GET /add-note - the form view needs the user's categories; a remote
/// failure degrades to an empty list rather than blocking the form.
pub async fn add_note_get(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
) -> impl IntoResponse {
    let categories = categories_or_empty(&state, &user).await;
    let (jar, flash) = flash::take(jar);
    (jar, Json(AddNoteView { flash, categories, error: None }))
}

/// POST /add-note - validate, insert through the elevated handle, redirect
/// to the full listing.
pub async fn add_note_post(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    Form(form): Form<AddNoteForm>,
) -> Response {
    if form.title.is_empty() || form.content.is_empty() {
        return rerender(&state, &user, jar, "Title and content are required!".to_string()).await;
    }

    let row = NewNote {
        title: form.title,
        content: form.content,
        user_id: user.id,
        is_important: form.is_important.is_some(),
        category_id: form
            .category_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| Uuid::parse_str(id).ok()),
    };

    match state
        .elevated
        .table("notes")
        .insert::<_, serde_json::Value>(&row)
        .await
    {
        Ok(created) if !created.is_empty() => {
            let jar = flash::set(jar, FlashLevel::Success, "Note added successfully!");
            (jar, Redirect::to("/all-notes")).into_response()
        }
        Ok(_) => rerender(&state, &user, jar, "Failed to add note. No data returned.".to_string()).await,
        Err(err) => {
            tracing::warn!("note insert failed: {err}");
            rerender(&state, &user, jar, format!("Error adding note: {err}")).await
        }
    }
}

async fn rerender(state: &AppState, user: &SessionUser, jar: CookieJar, error: String) -> Response {
    let categories = categories_or_empty(state, user).await;
    let (jar, flash) = flash::take(jar);
    (jar, Json(AddNoteView { flash, categories, error: Some(error) })).into_response()
}

async fn categories_or_empty(state: &AppState, user: &SessionUser) -> Vec<Category> {
    match state
        .restricted
        .table("categories")
        .eq("user_id", user.id)
        .fetch()
        .await
    {
        Ok(categories) => categories,
        Err(err) => {
            tracing::error!("failed to fetch categories for the add-note form: {err}");
            Vec::new()
        }
    }
}
