// handlers/notes/search.rs - GET /search

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
use crate::views::SearchView;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /search - case-insensitive "title contains q". An empty query
/// renders an empty result set without touching the notes table.
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let search_query = params.q.unwrap_or_default();

    let notes: Vec<NoteWithCategory> = if search_query.is_empty() {
        Vec::new()
    } else {
        state
            .restricted
            .table("notes")
            .select("*,categories(name,color)")
            .eq("user_id", user.id)
            .ilike_contains("title", &search_query)
            .order("created_at", SortDirection::Desc)
            .fetch()
            .await?
    };

    let categories: Vec<Category> = state
        .restricted
        .table("categories")
        .eq("user_id", user.id)
        .fetch()
        .await?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Json(SearchView {
            flash,
            notes,
            categories,
            search_query,
        }),
    ))
}
