// tests/common/mod.rs - In-process stub of the remote data service plus an
// app spawner. Integration tests drive the real HTTP surface while the stub
// plays the auth + table API with in-memory rows, so no external project or
// network is needed.

// Each test binary compiles this module and uses a different slice of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestHarness {
    pub base_url: String,
    pub remote: RemoteStub,
}

impl TestHarness {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Client that keeps cookies, like a browser session.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("client")
    }

    /// Client that does not follow redirects, for asserting Location targets.
    pub fn manual_redirect_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client")
    }

    /// Log in and make sure we actually landed on the dashboard.
    pub async fn login(&self, client: &reqwest::Client, email: &str, password: &str) -> Result<()> {
        let res = client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        anyhow::ensure!(
            res.url().path() == "/dashboard",
            "login did not reach the dashboard (landed on {})",
            res.url().path()
        );
        Ok(())
    }
}

/// Boot the stub and the application on free ports.
pub async fn spawn() -> Result<TestHarness> {
    let remote = RemoteStub::new();

    let remote_port = portpicker::pick_unused_port().context("no free port for the stub")?;
    let remote_listener =
        tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], remote_port))).await?;
    let stub_router = remote.router();
    tokio::spawn(async move {
        axum::serve(remote_listener, stub_router).await.expect("stub server");
    });

    let app_port = portpicker::pick_unused_port().context("no free port for the app")?;
    let config = notekeep::config::AppConfig {
        supabase_url: url::Url::parse(&format!("http://127.0.0.1:{}", remote_port))?,
        anon_key: "stub-anon-key".to_string(),
        service_key: "stub-service-key".to_string(),
        session_secret: "integration-test-secret".to_string(),
        session_expiry_hours: 24,
        port: app_port,
    };
    let state = notekeep::state::AppState::new(&config);
    let app = notekeep::app(state);
    let app_listener =
        tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], app_port))).await?;
    tokio::spawn(async move {
        axum::serve(app_listener, app).await.expect("app server");
    });

    Ok(TestHarness {
        base_url: format!("http://127.0.0.1:{}", app_port),
        remote,
    })
}

// ---------------------------------------------------------------------------
// Remote service stub
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct RemoteStub {
    state: Arc<StubState>,
}

#[derive(Default)]
struct StubState {
    users: Mutex<Vec<StubUser>>,
    tables: Mutex<HashMap<String, Vec<Value>>>,
    hits: Mutex<HashMap<String, usize>>,
    clock: Mutex<u32>,
}

#[derive(Clone)]
struct StubUser {
    id: Uuid,
    email: String,
    password: String,
}

impl RemoteStub {
    pub fn new() -> Self {
        Self { state: Arc::new(StubState::default()) }
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/admin/users", post(admin_create_user))
            .route(
                "/rest/v1/:table",
                get(table_select)
                    .post(table_insert)
                    .patch(table_update)
                    .delete(table_delete),
            )
            .with_state(self.clone())
    }

    /// Register a user directly, bypassing the app's /register flow.
    pub fn seed_user(&self, email: &str, password: &str) -> Uuid {
        let user = StubUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let id = user.id;
        self.state.users.lock().unwrap().push(user);
        id
    }

    pub fn seed_category(&self, user_id: Uuid, name: &str, color: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.push(
            "categories",
            json!({ "id": id, "name": name, "color": color, "user_id": user_id }),
        );
        id
    }

    pub fn seed_note(
        &self,
        user_id: Uuid,
        title: &str,
        important: bool,
        category_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.push(
            "notes",
            json!({
                "id": id,
                "title": title,
                "content": format!("body of {title}"),
                "user_id": user_id,
                "category_id": category_id,
                "is_important": important,
                "created_at": self.next_timestamp(),
            }),
        );
        id
    }

    /// Snapshot of a table's rows.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// How many requests have touched a table, any verb.
    pub fn hits(&self, table: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    fn push(&self, table: &str, row: Value) {
        self.state
            .tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    fn bump(&self, table: &str) {
        *self
            .state
            .hits
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default() += 1;
    }

    /// Monotonically increasing RFC3339 timestamps so creation order and
    /// string order agree.
    fn next_timestamp(&self) -> String {
        let mut clock = self.state.clock.lock().unwrap();
        *clock += 1;
        format!("2024-01-01T{:02}:{:02}:00+00:00", *clock / 60, *clock % 60)
    }
}

async fn token(State(stub): State<RemoteStub>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let users = stub.state.users.lock().unwrap();
    match users
        .iter()
        .find(|u| u.email == email && u.password == password)
    {
        Some(user) => Json(json!({
            "access_token": format!("stub-token-{}", user.id),
            "token_type": "bearer",
            "user": { "id": user.id, "email": user.email }
        }))
        .into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "Invalid login credentials" })),
        )
            .into_response(),
    }
}

async fn admin_create_user(State(stub): State<RemoteStub>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let mut users = stub.state.users.lock().unwrap();
    if users.iter().any(|u| u.email == email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "msg": "A user with this email address has already been registered" })),
        )
            .into_response();
    }
    let user = StubUser { id: Uuid::new_v4(), email, password };
    let response = Json(json!({ "id": user.id, "email": user.email })).into_response();
    users.push(user);
    response
}

async fn table_select(
    State(stub): State<RemoteStub>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    stub.bump(&table);

    let select = param(&params, "select").unwrap_or_else(|| "*".to_string());
    let mut rows = stub.rows(&table);
    apply_read_filters(&stub, &mut rows, &params);

    if let Some(order) = param(&params, "order") {
        sort_rows(&mut rows, &order);
    }

    let total = rows.len();
    if let Some(limit) = param(&params, "limit").and_then(|v| v.parse::<usize>().ok()) {
        rows.truncate(limit);
    }

    let shown = rows.len();
    let rows: Vec<Value> = rows
        .into_iter()
        .map(|row| project(&stub, &table, &select, row))
        .collect();

    let mut response = Json(Value::Array(rows)).into_response();
    if wants_exact_count(&headers) {
        let range = if shown == 0 {
            format!("*/{}", total)
        } else {
            format!("0-{}/{}", shown - 1, total)
        };
        response.headers_mut().insert(
            header::CONTENT_RANGE,
            HeaderValue::from_str(&range).expect("range header"),
        );
    }
    response
}

async fn table_insert(
    State(stub): State<RemoteStub>,
    Path(table): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    stub.bump(&table);

    let incoming = match body {
        Value::Array(list) => list,
        other => vec![other],
    };

    let mut created = Vec::new();
    for mut row in incoming {
        if row.get("id").is_none() {
            row["id"] = json!(Uuid::new_v4());
        }
        if table == "notes" {
            if row.get("created_at").is_none() {
                row["created_at"] = json!(stub.next_timestamp());
            }
            if row.get("category_id").is_none() {
                row["category_id"] = Value::Null;
            }
        }
        created.push(row);
    }

    stub.state
        .tables
        .lock()
        .unwrap()
        .entry(table)
        .or_default()
        .extend(created.clone());

    (StatusCode::CREATED, Json(Value::Array(created))).into_response()
}

async fn table_update(
    State(stub): State<RemoteStub>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    Json(patch): Json<Value>,
) -> Response {
    stub.bump(&table);

    let mut tables = stub.state.tables.lock().unwrap();
    if let Some(rows) = tables.get_mut(&table) {
        for row in rows.iter_mut().filter(|row| matches_filters(row, &params)) {
            if let Value::Object(fields) = &patch {
                for (key, value) in fields {
                    row[key.as_str()] = value.clone();
                }
            }
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn table_delete(
    State(stub): State<RemoteStub>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    stub.bump(&table);

    let mut tables = stub.state.tables.lock().unwrap();
    if let Some(rows) = tables.get_mut(&table) {
        rows.retain(|row| !matches_filters(row, &params));
    }
    StatusCode::NO_CONTENT.into_response()
}

// ---------------------------------------------------------------------------
// Filter plumbing (only the parameter shapes the app emits)
// ---------------------------------------------------------------------------

const RESERVED: &[&str] = &["select", "order", "limit", "offset"];

fn param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn apply_read_filters(stub: &RemoteStub, rows: &mut Vec<Value>, params: &[(String, String)]) {
    for (key, value) in params {
        if RESERVED.contains(&key.as_str()) {
            continue;
        }
        if let Some(wanted) = value.strip_prefix("eq.") {
            if key == "categories.name" {
                // Embedded-relation filter: restrict notes to those whose
                // joined category carries the wanted name.
                let categories = stub.rows("categories");
                rows.retain(|row| {
                    row["category_id"].as_str().is_some_and(|cid| {
                        categories
                            .iter()
                            .any(|c| c["id"].as_str() == Some(cid) && c["name"] == *wanted)
                    })
                });
            } else {
                rows.retain(|row| field_eq(row, key, wanted));
            }
        } else if let Some(pattern) = value.strip_prefix("ilike.") {
            let needle = pattern.trim_matches('*').to_lowercase();
            rows.retain(|row| {
                row[key.as_str()]
                    .as_str()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            });
        }
    }
}

fn matches_filters(row: &Value, params: &[(String, String)]) -> bool {
    params.iter().all(|(key, value)| {
        if RESERVED.contains(&key.as_str()) {
            return true;
        }
        match value.strip_prefix("eq.") {
            Some(wanted) => field_eq(row, key, wanted),
            None => true,
        }
    })
}

fn field_eq(row: &Value, key: &str, wanted: &str) -> bool {
    match &row[key] {
        Value::String(text) => text == wanted,
        Value::Bool(flag) => flag.to_string() == wanted,
        Value::Number(number) => number.to_string() == wanted,
        Value::Null => wanted == "null",
        _ => false,
    }
}

fn sort_rows(rows: &mut [Value], order: &str) {
    let (column, direction) = order.split_once('.').unwrap_or((order, "asc"));
    let column = column.to_string();
    rows.sort_by(|a, b| {
        let left = a[column.as_str()].as_str().unwrap_or_default();
        let right = b[column.as_str()].as_str().unwrap_or_default();
        left.cmp(right)
    });
    if direction == "desc" {
        rows.reverse();
    }
}

fn project(stub: &RemoteStub, table: &str, select: &str, mut row: Value) -> Value {
    if table == "notes" && select.contains("categories") {
        let embed = row["category_id"].as_str().and_then(|cid| {
            stub.rows("categories")
                .into_iter()
                .find(|c| c["id"].as_str() == Some(cid))
        });
        row["categories"] = match embed {
            Some(category) => json!({ "name": category["name"], "color": category["color"] }),
            None => Value::Null,
        };
    }
    if table == "categories" && select.contains("notes(count)") {
        let id = row["id"].clone();
        let count = stub
            .rows("notes")
            .iter()
            .filter(|note| note["category_id"] == id)
            .count();
        row["notes"] = json!([{ "count": count }]);
    }
    row
}

fn wants_exact_count(headers: &HeaderMap) -> bool {
    headers
        .get("prefer")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("count=exact"))
}
