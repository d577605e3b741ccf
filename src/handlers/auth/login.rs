// handlers/auth/login.rs - GET/POST /login

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::flash::{self, FlashLevel};
use crate::session;
use crate::state::AppState;
use crate::views::LoginView;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// GET /login - render the login view, consuming any pending flash.
pub async fn login_get(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(LoginView::new(flash)))
}

/// POST /login - check credentials against the remote auth subsystem and
/// open a session. Failures re-render the form with the submitted email
/// preserved.
pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let signin = match state.restricted.sign_in(&form.email, &form.password).await {
        Ok(signin) => signin,
        Err(err) => {
            tracing::warn!(email = %form.email, "sign-in rejected: {err}");
            let message = if err.is_client_rejection() {
                "Invalid email or password.".to_string()
            } else {
                format!("Login failed: {err}")
            };
            return Json(LoginView::failed(message, form.email)).into_response();
        }
    };

    match state
        .session
        .issue(signin.user.id, &signin.user.email, &signin.access_token)
    {
        Ok(token) => {
            let jar = jar.add(session::session_cookie(token));
            let jar = flash::set(jar, FlashLevel::Success, "Login successful!");
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(err) => {
            tracing::error!("failed to sign session token: {err}");
            Json(LoginView::failed(
                "Login failed: could not establish a session".to_string(),
                form.email,
            ))
            .into_response()
        }
    }
}
