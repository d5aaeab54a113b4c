//! Order API 模块
//!
//! All mutations go through [`crate::workflow::OrderWorkflow`]; the status
//! machine and table side effects never get bypassed here.

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/active", get(handler::active))
        .route("/today", get(handler::today))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/update_status", patch(handler::update_status))
        .route("/{id}/add_item", post(handler::add_item))
        .route("/{id}/remove_item", delete(handler::remove_item))
}
