// handlers/notes/toggle.rs - GET /toggle-important/:note_id

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Extension,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::redirect_back;
use crate::error::AppError;
use crate::flash::{self, FlashLevel};
use crate::session::SessionUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ImportanceRow {
    is_important: bool,
}

/// GET /toggle-important/:note_id - flip the flag on an owned note. Unknown
/// and unparseable ids are silent no-ops.
pub async fn toggle_important(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(note_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(note_id) = Uuid::parse_str(&note_id) else {
        return Ok(redirect_back(&headers, jar));
    };

    let current: Option<ImportanceRow> = state
        .restricted
        .table("notes")
        .select("is_important")
        .eq("id", note_id)
        .eq("user_id", user.id)
        .fetch_one()
        .await?;

    let jar = match current {
        Some(row) => {
            state
                .elevated
                .table("notes")
                .eq("id", note_id)
                .eq("user_id", user.id)
                .update(&json!({ "is_important": !row.is_important }))
                .await?;
            flash::set(jar, FlashLevel::Success, "Note updated!")
        }
        None => jar,
    };

    Ok(redirect_back(&headers, jar))
}
