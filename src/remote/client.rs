use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::remote::error::RemoteError;
use crate::remote::query::TableQuery;

/// One configured handle to the remote data service.
///
/// The restricted handle carries the public key (row-level policy applies);
/// the elevated handle carries the service key and bypasses it. Handles are
/// immutable after construction and shared across requests.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

/// Remote user identity as returned by the auth subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: Uuid,
    pub email: String,
}

/// Successful password sign-in: the user plus their access token.
#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub access_token: String,
    pub user: RemoteUser,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AdminCreateUser<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: UserMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    full_name: &'a str,
}

impl RemoteClient {
    pub fn new(base: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
            api_key: api_key.into(),
        }
    }

    /// Start a table operation.
    pub fn table(&self, name: impl Into<String>) -> TableQuery<'_> {
        TableQuery::new(self, name)
    }

    /// Password sign-in against the auth subsystem.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, RemoteError> {
        let request = self
            .http
            .post(self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let response = check(self.authorize(request).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Create a user with email confirmation pre-satisfied. Only meaningful
    /// on the elevated handle; the restricted key is rejected upstream.
    pub async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<RemoteUser, RemoteError> {
        let request = self
            .http
            .post(self.endpoint("/auth/v1/admin/users"))
            .json(&AdminCreateUser {
                email,
                password,
                email_confirm: true,
                user_metadata: UserMetadata { full_name },
            });
        match check(self.authorize(request).send().await?).await {
            Ok(response) => Ok(response.json().await?),
            Err(RemoteError::Service { message, .. }) if is_already_registered(&message) => {
                Err(RemoteError::AlreadyRegistered)
            }
            Err(other) => Err(other),
        }
    }

    pub(crate) async fn select(
        &self,
        table: &str,
        params: &[(String, String)],
        count_exact: bool,
    ) -> Result<Response, RemoteError> {
        let mut request = self.http.get(self.table_endpoint(table)).query(params);
        if count_exact {
            request = request.header("Prefer", "count=exact");
        }
        check(self.authorize(request).send().await?).await
    }

    pub(crate) async fn insert<B>(&self, table: &str, body: &B) -> Result<Response, RemoteError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .post(self.table_endpoint(table))
            .header("Prefer", "return=representation")
            .json(body);
        check(self.authorize(request).send().await?).await
    }

    pub(crate) async fn update<B>(
        &self,
        table: &str,
        filters: &[(String, String)],
        patch: &B,
    ) -> Result<(), RemoteError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .patch(self.table_endpoint(table))
            .query(filters)
            .json(patch);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    pub(crate) async fn delete(
        &self,
        table: &str,
        filters: &[(String, String)],
    ) -> Result<(), RemoteError> {
        let request = self.http.delete(self.table_endpoint(table)).query(filters);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn table_endpoint(&self, table: &str) -> Url {
        self.endpoint(&format!("/rest/v1/{}", table))
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }
}

/// Map non-success responses to [`RemoteError::Service`] with the service's
/// own message text.
async fn check(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Service {
        status: status.as_u16(),
        message: service_message(&body, status.as_u16()),
    })
}

/// Pull a human-readable message out of an error body. The auth and table
/// subsystems use different field names for it.
fn service_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    if body.is_empty() {
        format!("remote service returned status {}", status)
    } else {
        body.to_string()
    }
}

fn is_already_registered(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("already registered") || message.contains("already been registered")
}
