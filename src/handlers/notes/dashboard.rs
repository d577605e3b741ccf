// handlers/notes/dashboard.rs - GET /dashboard

use axum::{extract::State, response::IntoResponse, Extension, Json};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::flash;
use crate::models::{Category, NoteWithCategory};
use crate::remote::SortDirection;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views::DashboardView;

/// GET /dashboard - the five most recent notes plus summary counts.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let recent_notes: Vec<NoteWithCategory> = state
        .restricted
        .table("notes")
        .select("*,categories(name,color)")
        .eq("user_id", user.id)
        .order("created_at", SortDirection::Desc)
        .limit(5)
        .fetch()
        .await?;

    let categories: Vec<Category> = state
        .restricted
        .table("categories")
        .eq("user_id", user.id)
        .fetch()
        .await?;

    let total_notes = state
        .restricted
        .table("notes")
        .eq("user_id", user.id)
        .count()
        .await?;

    let important_notes_count = state
        .restricted
        .table("notes")
        .eq("user_id", user.id)
        .eq("is_important", true)
        .count()
        .await?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Json(DashboardView {
            flash,
            recent_notes,
            categories,
            total_notes,
            important_notes_count,
        }),
    ))
}
