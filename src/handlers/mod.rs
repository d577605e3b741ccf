// handlers/mod.rs - One module per user-facing operation group.

pub mod auth;
pub mod categories;
pub mod notes;

use axum::{extract::State, response::Redirect};
use axum_extra::extract::CookieJar;

use crate::session;
use crate::state::AppState;

/// GET / - entry point: dashboard when a session decodes, login otherwise.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if session::current_user(&state.session, &jar).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}
