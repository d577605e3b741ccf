// handlers/categories/add.rs - POST /add-category

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::error::AppError;
use crate::flash::{self, FlashLevel};
use crate::models::NewCategory;
use crate::session::SessionUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCategoryForm {
    pub category_name: String,
    pub category_color: String,
}

/// POST /add-category - insert when the name is non-empty; an empty name is
/// a silent no-op.
pub async fn add_category(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    Form(form): Form<AddCategoryForm>,
) -> Result<Response, AppError> {
    let jar = if form.category_name.is_empty() {
        jar
    } else {
        state
            .elevated
            .table("categories")
            .insert::<_, serde_json::Value>(&NewCategory {
                name: form.category_name,
                color: form.category_color,
                user_id: user.id,
            })
            .await?;
        flash::set(jar, FlashLevel::Success, "Category added!")
    };

    Ok((jar, Redirect::to("/categories")).into_response())
}
