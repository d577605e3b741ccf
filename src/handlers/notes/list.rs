// handlers/notes/list.rs - GET /all-notes

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::error::AppError;
use crate::flash;
use crate::models::{Category, NoteWithCategory};
use crate::remote::SortDirection;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views::NotesView;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /all-notes - every note, newest first, optionally restricted to one
/// category by name. The filter rides on an inner-join embed; a plain embed
/// would keep unmatched parent rows.
pub async fn all_notes(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let current_category = params.category.unwrap_or_else(|| "all".to_string());

    let query = state.restricted.table("notes");
    let query = if current_category == "all" {
        query.select("*,categories(name,color)")
    } else {
        query
            .select("*,categories!inner(name,color)")
            .eq("categories.name", &current_category)
    };
    let notes: Vec<NoteWithCategory> = query
        .eq("user_id", user.id)
        .order("created_at", SortDirection::Desc)
        .fetch()
        .await?;

    let categories: Vec<Category> = state
        .restricted
        .table("categories")
        .eq("user_id", user.id)
        .fetch()
        .await?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Json(NotesView {
            flash,
            notes,
            categories,
            current_category,
        }),
    ))
}
