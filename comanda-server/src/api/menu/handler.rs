//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing menu items
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub available: Option<bool>,
}

/// GET /api/menu - 获取菜单 (可按分类/可售过滤)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo
        .find_all(query.category.map(|c| c.to_uppercase()), query.available)
        .await?;
    Ok(Json(items))
}

/// GET /api/menu/categories - 实际在售分类列表
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.categories().await?))
}

/// GET /api/menu/available - 仅可售菜品
pub async fn available(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.find_available().await?))
}

/// GET /api/menu/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu - 创建菜品
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/menu/:id - 更新菜品
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// DELETE /api/menu/:id - 删除菜品
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.delete(&id).await?))
}
