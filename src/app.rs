use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entry", post(handlers::entry_form))
        .route("/diary", get(handlers::diary_page).post(handlers::diary_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/entries", get(handlers::list_entries).post(handlers::save_entry))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/diary", post(handlers::save_diary))
        .route("/api/profile", post(handlers::upsert_profile))
        .with_state(state)
}
