use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flash::{self, FlashLevel};
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "notekeep_session";

/// Capability-token claims carried by the session cookie. `exp` bounds the
/// session's lifetime; there is no per-request re-validation upstream and no
/// revocation list.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub access_token: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing material and validity window for session tokens.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours: expiry_hours as i64,
        }
    }

    /// Issue a signed session token for a fresh sign-in.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        access_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            access_token: access_token.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Decode and validate a session token. Expired or tampered tokens are
    /// indistinguishable from absent ones.
    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).ok()?;
        Some(SessionUser {
            id: data.claims.sub,
            email: data.claims.email,
            access_token: data.claims.access_token,
        })
    }
}

/// Authenticated user context injected into protected requests.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
}

/// Build the session cookie for a signed token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Removal cookie used by logout.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

/// Resolve the current session from the request cookies, if any.
pub fn current_user(keys: &SessionKeys, jar: &CookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    keys.verify(cookie.value())
}

/// Gate for protected routes. A missing or invalid session redirects to the
/// login page with a flash notice; otherwise the [`SessionUser`] rides along
/// as a request extension.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    match current_user(&state.session, &jar) {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => {
            let jar = flash::set(jar, FlashLevel::Error, "Please log in to access this page.");
            Err((jar, Redirect::to("/login")).into_response())
        }
    }
}
