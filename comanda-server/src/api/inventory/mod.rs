//! Inventory API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/low_stock", get(handler::low_stock))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/update_quantity", patch(handler::update_quantity))
        .route("/{id}/restock", post(handler::restock))
}
