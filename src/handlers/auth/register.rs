// handlers/auth/register.rs - GET/POST /register

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::flash::{self, FlashLevel};
use crate::models::{self, NewProfile};
use crate::remote::RemoteError;
use crate::state::AppState;
use crate::views::RegisterView;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// GET /register - render the registration view.
pub async fn register_get(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(RegisterView::new(flash)))
}

/// POST /register - create the remote user (email confirmation
/// pre-satisfied), then its profile row and the four default categories.
pub async fn register_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    match create_account(&state, &form).await {
        Ok(()) => {
            let jar = flash::set(
                jar,
                FlashLevel::Success,
                "Registration successful! You can now login.",
            );
            (jar, Redirect::to("/login")).into_response()
        }
        Err(RemoteError::AlreadyRegistered) => Json(RegisterView::failed(
            "Email already registered. Please login.".to_string(),
            form.email,
            form.full_name,
        ))
        .into_response(),
        Err(err) => {
            tracing::warn!(email = %form.email, "registration failed: {err}");
            Json(RegisterView::failed(
                format!("Registration failed: {err}"),
                form.email,
                form.full_name,
            ))
            .into_response()
        }
    }
}

// The steps are not atomic: the remote service has no cross-request
// transaction. The category batch goes in one insert so a partial failure
// cannot leave a half-seeded default set.
async fn create_account(state: &AppState, form: &RegisterForm) -> Result<(), RemoteError> {
    let user = state
        .elevated
        .admin_create_user(&form.email, &form.password, &form.full_name)
        .await?;

    state
        .elevated
        .table("profiles")
        .insert::<_, serde_json::Value>(&NewProfile {
            id: user.id,
            email: form.email.clone(),
            full_name: form.full_name.clone(),
        })
        .await?;

    state
        .elevated
        .table("categories")
        .insert::<_, serde_json::Value>(&models::default_categories(user.id))
        .await?;

    Ok(())
}
