// handlers/auth/logout.rs - GET /logout

use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::CookieJar;

use crate::flash::{self, FlashLevel};
use crate::session;

/// GET /logout - drop the session cookie unconditionally.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(session::clear_session_cookie());
    let jar = flash::set(jar, FlashLevel::Success, "Logged out successfully.");
    (jar, Redirect::to("/login"))
}
