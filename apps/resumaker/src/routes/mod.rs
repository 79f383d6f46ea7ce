pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::editor::{handlers, pages};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(pages::handle_page))
        .route("/toggle", post(pages::handle_toggle))
        .route("/form/submit", post(pages::handle_form_submit))
        .route("/form/cancel", post(pages::handle_form_cancel))
        .route("/form/items/:list/add", post(pages::handle_form_add))
        .route(
            "/form/items/:list/:index/remove",
            post(pages::handle_form_remove),
        )
        // Editor API
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/editor", get(handlers::handle_get_editor))
        .route("/api/v1/editor/edit", post(handlers::handle_begin_edit))
        .route("/api/v1/editor/field", patch(handlers::handle_set_field))
        .route(
            "/api/v1/editor/items/:list",
            post(handlers::handle_append_item),
        )
        .route(
            "/api/v1/editor/items/:list/:index",
            delete(handlers::handle_remove_item),
        )
        .route("/api/v1/editor/submit", post(handlers::handle_submit))
        .route("/api/v1/editor/cancel", post(handlers::handle_cancel))
        .with_state(state)
}
