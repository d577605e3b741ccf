pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod remote;
pub mod session;
pub mod state;
pub mod views;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Public session lifecycle
        .merge(auth_routes())
        // Everything else sits behind the session gate
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/login", get(auth::login_get).post(auth::login_post))
        .route("/register", get(auth::register_get).post(auth::register_post))
        .route("/logout", get(auth::logout))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::{categories, notes};

    Router::new()
        .route("/dashboard", get(notes::dashboard))
        .route("/all-notes", get(notes::all_notes))
        .route("/important-notes", get(notes::important_notes))
        .route("/add-note", get(notes::add_note_get).post(notes::add_note_post))
        .route("/toggle-important/:note_id", get(notes::toggle_important))
        .route("/delete-note/:note_id", get(notes::delete_note))
        .route("/search", get(notes::search))
        .route("/categories", get(categories::list_categories))
        .route("/add-category", post(categories::add_category))
        .route("/delete-category/:category_id", get(categories::delete_category))
        .route_layer(middleware::from_fn_with_state(
            state,
            session::require_session,
        ))
}
