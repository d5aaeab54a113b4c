//! Reservation API 模块

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/today", get(handler::today))
        .route("/upcoming", get(handler::upcoming))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/complete", post(handler::complete))
}
