//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::AppState;
use crate::db::models::{
    Payment, PaymentComplete, PaymentCreate, PaymentMethodSummary, PaymentUpdate,
};
use crate::db::repository::PaymentRepository;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::{AppError, AppResult};

/// Query params for listing payments
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub date: Option<String>,
}

/// GET /api/payments - 获取支付 (可按状态/方式/日期过滤)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Payment>>> {
    let range = match query.date {
        Some(d) => {
            let date = parse_date(&d)?;
            let tz = state.config.timezone;
            Some((day_start_millis(date, tz), day_end_millis(date, tz)))
        }
        None => None,
    };
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo
        .find_filtered(
            query.payment_status.map(|s| s.to_uppercase()),
            query.payment_method.map(|m| m.to_uppercase()),
            range,
        )
        .await?;
    Ok(Json(payments))
}

/// GET /api/payments/today - 今日支付
pub async fn today(State(state): State<AppState>) -> AppResult<Json<Vec<Payment>>> {
    let tz = state.config.timezone;
    let date = crate::utils::time::today(tz);
    let repo = PaymentRepository::new(state.db.clone());
    let payments = repo
        .find_filtered(
            None,
            None,
            Some((day_start_millis(date, tz), day_end_millis(date, tz))),
        )
        .await?;
    Ok(Json(payments))
}

/// Query params for the summary report
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: Option<String>,
}

/// GET /api/payments/summary?date= - 按支付方式汇总 (仅已完成)
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<Vec<PaymentMethodSummary>>> {
    let date = match query.date {
        Some(d) => parse_date(&d)?,
        None => crate::utils::time::today(state.config.timezone),
    };
    Ok(Json(state.report_service().payment_summary(date).await?))
}

/// GET /api/payments/:id - 获取单笔支付
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payment>> {
    let repo = PaymentRepository::new(state.db.clone());
    let payment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment {} not found", id)))?;
    Ok(Json(payment))
}

/// POST /api/payments - 创建支付 (税额服务端计算)
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    Ok(Json(state.payment_workflow().create(payload).await?))
}

/// PUT /api/payments/:id - 更新支付 (final_amount 重新计算)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<Payment>> {
    Ok(Json(state.payment_workflow().update(&id, payload).await?))
}

/// POST /api/payments/:id/complete_payment - 完成支付
///
/// 副作用：订单置 SERVED，桌台释放
pub async fn complete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentComplete>,
) -> AppResult<Json<Payment>> {
    Ok(Json(
        state
            .payment_workflow()
            .complete(&id, payload.transaction_id)
            .await?,
    ))
}

/// POST /api/payments/:id/refund - 退款
///
/// 副作用：订单置 CANCELLED，桌台释放
pub async fn refund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Payment>> {
    Ok(Json(state.payment_workflow().refund(&id).await?))
}

/// DELETE /api/payments/:id - 删除支付
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PaymentRepository::new(state.db.clone());
    Ok(Json(repo.delete(&id).await?))
}
