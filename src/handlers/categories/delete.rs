// handlers/categories/delete.rs - GET /delete-category/:category_id

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::flash::{self, FlashLevel};
use crate::session::SessionUser;
use crate::state::AppState;

/// GET /delete-category/:category_id - unlink referencing notes first, then
/// delete the category. With this ordering an interruption can only leave
/// unlinked notes and a surviving category, never a dangling reference.
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    Path(category_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(category_id) = Uuid::parse_str(&category_id) else {
        return Ok((jar, Redirect::to("/categories")).into_response());
    };

    state
        .elevated
        .table("notes")
        .eq("category_id", category_id)
        .eq("user_id", user.id)
        .update(&json!({ "category_id": null }))
        .await?;

    state
        .elevated
        .table("categories")
        .eq("id", category_id)
        .eq("user_id", user.id)
        .delete()
        .await?;

    let jar = flash::set(jar, FlashLevel::Success, "Category deleted!");
    Ok((jar, Redirect::to("/categories")).into_response())
}
