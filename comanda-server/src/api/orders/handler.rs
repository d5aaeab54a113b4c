//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{
    Order, OrderCreate, OrderItemInput, OrderRemoveItem, OrderStatus, OrderStatusUpdate,
    OrderUpdate, OrderWithItems,
};
use crate::db::repository::OrderRepository;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub table: Option<String>,
    pub date: Option<String>,
}

/// GET /api/orders - 获取订单 (可按状态/桌台/日期过滤)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let range = match query.date {
        Some(d) => {
            let date = parse_date(&d)?;
            let tz = state.config.timezone;
            Some((day_start_millis(date, tz), day_end_millis(date, tz)))
        }
        None => None,
    };
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_filtered(query.status.map(|s| s.to_uppercase()), query.table, range)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/active - 进行中订单 (PENDING / IN_PROGRESS)
pub async fn active(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    Ok(Json(repo.find_active().await?))
}

/// GET /api/orders/today - 今日订单
pub async fn today(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let tz = state.config.timezone;
    let date = crate::utils::time::today(tz);
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_filtered(
            None,
            None,
            Some((day_start_millis(date, tz), day_end_millis(date, tz))),
        )
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 订单详情 (含明细)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(state.order_workflow().get_with_items(&id).await?))
}

/// POST /api/orders - 创建订单 (含明细，占用桌台)
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(state.order_workflow().create_order(payload).await?))
}

/// PUT /api/orders/:id - 更新订单元数据 (客户名/备注)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.order_workflow().update_metadata(&id, payload).await?))
}

/// PATCH /api/orders/:id/update_status - 状态流转
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let status = OrderStatus::parse_str(&payload.status.to_uppercase())
        .ok_or_else(|| AppError::validation(format!("Invalid status: {}", payload.status)))?;
    Ok(Json(state.order_workflow().update_status(&id, status).await?))
}

/// POST /api/orders/:id/add_item - 加菜 (价格快照)
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderItemInput>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(state.order_workflow().add_item(&id, payload).await?))
}

/// DELETE /api/orders/:id/remove_item - 退菜
pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderRemoveItem>,
) -> AppResult<Json<OrderWithItems>> {
    Ok(Json(
        state
            .order_workflow()
            .remove_item(&id, &payload.item_id)
            .await?,
    ))
}

/// DELETE /api/orders/:id - 删除订单 (级联删除明细与支付)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.order_workflow().delete_order(&id).await?))
}
