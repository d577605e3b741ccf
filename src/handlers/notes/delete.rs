// handlers/notes/delete.rs - GET /delete-note/:note_id

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Extension,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use super::redirect_back;
use crate::error::AppError;
use crate::flash::{self, FlashLevel};
use crate::session::SessionUser;
use crate::state::AppState;

/// GET /delete-note/:note_id - remove an owned note. Deleting an absent or
/// foreign id matches nothing and is a no-op.
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(note_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(note_id) = Uuid::parse_str(&note_id) else {
        return Ok(redirect_back(&headers, jar));
    };

    state
        .elevated
        .table("notes")
        .eq("id", note_id)
        .eq("user_id", user.id)
        .delete()
        .await?;

    let jar = flash::set(jar, FlashLevel::Success, "Note deleted!");
    Ok(redirect_back(&headers, jar))
}
