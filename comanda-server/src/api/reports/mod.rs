//! Reports API 模块 (数据报表)

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily_sales", get(handler::daily_sales))
        .route("/inventory_alerts", get(handler::inventory_alerts))
        .route("/reservation_summary", get(handler::reservation_summary))
        .route("/popular_items", get(handler::popular_items))
}
