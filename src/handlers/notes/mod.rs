// handlers/notes/mod.rs - Note listing and mutation handlers.

pub mod add;
pub mod dashboard;
pub mod delete;
pub mod important;
pub mod list;
pub mod search;
pub mod toggle;

pub use add::{add_note_get, add_note_post};
pub use dashboard::dashboard;
pub use delete::delete_note;
pub use important::important_notes;
pub use list::all_notes;
pub use search::search;
pub use toggle::toggle_important;

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

/// Redirect to the page the request came from; dashboard as the fallback.
pub(crate) fn redirect_back(headers: &HeaderMap, jar: CookieJar) -> Response {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/dashboard");
    (jar, Redirect::to(target)).into_response()
}
