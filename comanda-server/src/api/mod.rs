//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 菜单管理接口
//! - [`tables`] - 桌台管理接口
//! - [`reservations`] - 预订管理接口
//! - [`orders`] - 订单管理接口
//! - [`payments`] - 支付管理接口
//! - [`inventory`] - 库存管理接口
//! - [`reports`] - 报表接口

pub mod health;

// Resource APIs
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod reservations;
pub mod tables;

use axum::Router;

use crate::core::AppState;

/// Build the full application router (without state)
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(inventory::router())
        .merge(reports::router())
}
