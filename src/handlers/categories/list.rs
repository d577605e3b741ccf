// handlers/categories/list.rs - GET /categories

use axum::{extract::State, response::IntoResponse, Extension, Json};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::flash;
use crate::models::CategoryWithCount;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::views::{CategoriesView, CategorySummary};

/// GET /categories - every category with its note count. The count
/// aggregate crosses into the notes relation, which row-level policy hides
/// from the restricted key, so this read goes through the elevated handle.
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let categories: Vec<CategoryWithCount> = state
        .elevated
        .table("categories")
        .select("*,notes(count)")
        .eq("user_id", user.id)
        .fetch()
        .await?;

    let categories = categories.into_iter().map(CategorySummary::from).collect();

    let (jar, flash) = flash::take(jar);
    Ok((jar, Json(CategoriesView { flash, categories })))
}
