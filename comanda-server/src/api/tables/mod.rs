//! Dining Table API 模块

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/available", get(handler::available))
        .route("/by_capacity", get(handler::by_capacity))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/mark_available", post(handler::mark_available))
        .route("/{id}/mark_unavailable", post(handler::mark_unavailable))
}
