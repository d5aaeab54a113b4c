//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/tables/available - 仅空闲桌台
pub async fn available(State(state): State<AppState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.find_available().await?))
}

/// Query params for by_capacity
#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    pub min_capacity: Option<i32>,
}

/// GET /api/tables/by_capacity?min_capacity= - 按最小容量筛选空闲桌台
pub async fn by_capacity(
    State(state): State<AppState>,
    Query(query): Query<CapacityQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(
        repo.find_by_min_capacity(query.min_capacity.unwrap_or(1))
            .await?,
    ))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// POST /api/tables/:id/mark_available - 标记空闲
pub async fn mark_available(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.set_availability(&id, true).await?))
}

/// POST /api/tables/:id/mark_unavailable - 标记占用
pub async fn mark_unavailable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.set_availability(&id, false).await?))
}

/// DELETE /api/tables/:id - 删除桌台
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    Ok(Json(repo.delete(&id).await?))
}
