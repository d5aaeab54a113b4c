//! Reports API Handlers
//!
//! Thin wrappers over [`crate::reports::ReportService`]; date parameters
//! default to the current business day.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::InventoryView;
use crate::reports::{DailySalesReport, PopularItem, ReservationSummary};
use crate::utils::AppResult;
use crate::utils::time::{parse_date, today};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn effective_date(param: Option<String>, state: &AppState) -> AppResult<NaiveDate> {
    match param {
        Some(d) => parse_date(&d),
        None => Ok(today(state.config.timezone)),
    }
}

/// GET /api/reports/daily_sales?date= - 日销售报表
pub async fn daily_sales(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DailySalesReport>> {
    let date = effective_date(query.date, &state)?;
    Ok(Json(state.report_service().daily_sales(date).await?))
}

/// GET /api/reports/inventory_alerts - 需补货库存
pub async fn inventory_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryView>>> {
    Ok(Json(state.report_service().inventory_alerts().await?))
}

/// GET /api/reports/reservation_summary?start_date=&end_date= - 预订汇总
pub async fn reservation_summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<ReservationSummary>> {
    let start = effective_date(query.start_date, &state)?;
    let end = effective_date(query.end_date, &state)?;
    Ok(Json(
        state.report_service().reservation_summary(start, end).await?,
    ))
}

/// GET /api/reports/popular_items?date= - 热销菜品 Top 10
pub async fn popular_items(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<PopularItem>>> {
    let date = effective_date(query.date, &state)?;
    Ok(Json(state.report_service().popular_items(date).await?))
}
