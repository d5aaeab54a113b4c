//! Payment API 模块
//!
//! All mutations go through [`crate::workflow::PaymentWorkflow`]; completion
//! and refund side effects (order status, table availability) never get
//! bypassed here.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/today", get(handler::today))
        .route("/summary", get(handler::summary))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/complete_payment", post(handler::complete_payment))
        .route("/{id}/refund", post(handler::refund))
}
