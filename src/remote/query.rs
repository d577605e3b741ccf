use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::remote::client::RemoteClient;
use crate::remote::error::RemoteError;

/// Sort direction for an `order` clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn to_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Builder for one table operation against the remote service.
///
/// Filters accumulate as query parameters; the finisher picks the verb.
/// Results come back in one canonical shape: `Vec<T>` for reads, `i64` for
/// counts, `Vec<R>` of created rows for inserts.
pub struct TableQuery<'a> {
    client: &'a RemoteClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a RemoteClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Projection, including embedded relations
    /// (`*,categories(name,color)`). Defaults to `*`.
    pub fn select(mut self, projection: impl Into<String>) -> Self {
        self.select = Some(projection.into());
        self
    }

    /// Equality filter. Dotted columns address an embedded relation.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive "column contains needle".
    pub fn ilike_contains(mut self, column: &str, needle: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("ilike.*{}*", needle)));
        self
    }

    pub fn order(mut self, column: &str, direction: SortDirection) -> Self {
        self.order = Some(format!("{}.{}", column, direction.to_param()));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for a read, in emission order.
    fn read_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(
            "select".to_string(),
            self.select.clone().unwrap_or_else(|| "*".to_string()),
        )];
        params.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Writes carry only the row filters.
    fn write_params(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, RemoteError> {
        let response = self
            .client
            .select(&self.table, &self.read_params(), false)
            .await?;
        Ok(response.json().await?)
    }

    /// Fetch the first matching row, if any.
    pub async fn fetch_one<T: DeserializeOwned>(mut self) -> Result<Option<T>, RemoteError> {
        self.limit = Some(1);
        let response = self
            .client
            .select(&self.table, &self.read_params(), false)
            .await?;
        let mut rows: Vec<T> = response.json().await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    /// Exact count of matching rows, without transferring them.
    pub async fn count(mut self) -> Result<i64, RemoteError> {
        self.select = Some("id".to_string());
        self.limit = Some(1);
        let response = self
            .client
            .select(&self.table, &self.read_params(), true)
            .await?;
        total_from_content_range(response.headers())
    }

    /// Insert one row or a batch, returning the created representation.
    pub async fn insert<B, R>(self, body: &B) -> Result<Vec<R>, RemoteError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.client.insert(&self.table, body).await?;
        Ok(response.json().await?)
    }

    /// Apply a partial update to every matching row.
    pub async fn update<B>(self, patch: &B) -> Result<(), RemoteError>
    where
        B: Serialize + ?Sized,
    {
        self.client
            .update(&self.table, &self.write_params(), patch)
            .await
    }

    /// Delete every matching row.
    pub async fn delete(self) -> Result<(), RemoteError> {
        self.client.delete(&self.table, &self.write_params()).await
    }
}

/// Exact total from a `Content-Range` header (`0-4/27` or `*/0`).
pub(crate) fn total_from_content_range(headers: &HeaderMap) -> Result<i64, RemoteError> {
    headers
        .get(reqwest::header::CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.rsplit('/').next())
        .and_then(|total| total.parse().ok())
        .ok_or(RemoteError::MissingCount)
}
