//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::db::repository::ReservationRepository;
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};

/// Query params for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub date: Option<String>,
    pub customer_phone: Option<String>,
}

/// GET /api/reservations - 获取预订 (可按状态/日期/电话过滤)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let date = match query.date {
        Some(d) => Some(parse_date(&d)?.format("%Y-%m-%d").to_string()),
        None => None,
    };
    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo
        .find_filtered(
            query.status.map(|s| s.to_uppercase()),
            date,
            query.customer_phone,
        )
        .await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/today - 今日预订
pub async fn today(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let date = crate::utils::time::today(state.config.timezone)
        .format("%Y-%m-%d")
        .to_string();
    let repo = ReservationRepository::new(state.db.clone());
    Ok(Json(repo.find_by_date(date).await?))
}

/// GET /api/reservations/upcoming - 今日起已预订
pub async fn upcoming(State(state): State<AppState>) -> AppResult<Json<Vec<Reservation>>> {
    let date = crate::utils::time::today(state.config.timezone)
        .format("%Y-%m-%d")
        .to_string();
    let repo = ReservationRepository::new(state.db.clone());
    Ok(Json(repo.find_upcoming(date).await?))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;
    Ok(Json(reservation))
}

/// POST /api/reservations - 创建预订
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.reservation_workflow().create(payload).await?))
}

/// PUT /api/reservations/:id - 更新预订 (重新执行容量/冲突检查)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.reservation_workflow().update(&id, payload).await?))
}

/// POST /api/reservations/:id/cancel - 取消预订 (幂等)
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.reservation_workflow().cancel(&id).await?))
}

/// POST /api/reservations/:id/complete - 完成预订
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.reservation_workflow().complete(&id).await?))
}

/// DELETE /api/reservations/:id - 删除预订
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.reservation_workflow().delete(&id).await?))
}
