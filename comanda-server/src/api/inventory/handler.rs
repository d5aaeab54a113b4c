//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::AppState;
use crate::db::models::{
    InventoryCreate, InventoryUpdate, InventoryView, QuantityChange, Restock,
};
use crate::db::repository::InventoryRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/inventory - 全部库存
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<InventoryView>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(Json(items.into_iter().map(InventoryView::from).collect()))
}

/// GET /api/inventory/low_stock - 库存不足 (quantity ≤ reorder_level)
pub async fn low_stock(State(state): State<AppState>) -> AppResult<Json<Vec<InventoryView>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let items = repo.find_low_stock().await?;
    Ok(Json(items.into_iter().map(InventoryView::from).collect()))
}

/// GET /api/inventory/:id - 单项库存
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<InventoryView>> {
    let repo = InventoryRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {} not found", id)))?;
    Ok(Json(item.into()))
}

/// POST /api/inventory - 创建库存项
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<InventoryCreate>,
) -> AppResult<Json<InventoryView>> {
    validate_required_text(&payload.item_name, "item_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;

    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?.into()))
}

/// PUT /api/inventory/:id - 更新库存项
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryUpdate>,
) -> AppResult<Json<InventoryView>> {
    validate_optional_text(&payload.item_name, "item_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;

    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?.into()))
}

/// PATCH /api/inventory/:id/update_quantity - 数量增减
///
/// 结果为负时拒绝，库存保持不变
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuantityChange>,
) -> AppResult<Json<InventoryView>> {
    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(
        repo.adjust_quantity(&id, payload.quantity_change)
            .await?
            .into(),
    ))
}

/// POST /api/inventory/:id/restock - 进货 (数量必须为正)
pub async fn restock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Restock>,
) -> AppResult<Json<InventoryView>> {
    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(repo.restock(&id, payload.quantity).await?.into()))
}

/// DELETE /api/inventory/:id - 删除库存项
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(repo.delete(&id).await?))
}
