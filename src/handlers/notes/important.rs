// handlers/notes/important.rs - GET /important-notes

use axum::{extract::State, response::IntoResponse, Extension, Json};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::flash;
use crate::models::NoteWithCategory;
use crate::remote::SortDirection;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views::ImportantNotesView;

/// GET /important-notes - flagged notes only, newest first.
pub async fn important_notes(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let notes: Vec<NoteWithCategory> = state
        .restricted
        .table("notes")
        .select("*,categories(name,color)")
        .eq("user_id", user.id)
        .eq("is_important", true)
        .order("created_at", SortDirection::Desc)
        .fetch()
        .await?;

    let (jar, flash) = flash::take(jar);
    Ok((jar, Json(ImportantNotesView { flash, notes })))
}
