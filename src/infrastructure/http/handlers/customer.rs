//! Customer HTTP Handlers
//!
//! 每个 handler 只调用一次仓储操作，并把结果序列化为 JSON。
//! 字段校验在这里完成，仓储错误统一经 ApiError 转换为状态码

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::infrastructure::http::dto::{CustomerPayload, CustomerResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取所有活跃客户
pub async fn list_customers(State(state): State<Arc<AppState>>) -> Json<Vec<CustomerResponse>> {
    let customers = state.customer_repo.find_all().await;
    Json(customers.into_iter().map(CustomerResponse::from).collect())
}

/// 根据 ID 获取客户
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.customer_repo.find_by_id(id).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// 按国家筛选客户（忽略大小写）
pub async fn list_customers_by_country(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Json<Vec<CustomerResponse>> {
    let customers = state.customer_repo.find_by_country(&country).await;
    Json(customers.into_iter().map(CustomerResponse::from).collect())
}

/// 活跃客户数量
pub async fn count_customers(State(state): State<Arc<AppState>>) -> Json<usize> {
    Json(state.customer_repo.count().await)
}

/// 新增客户
///
/// 成功返回 201，响应体为已分配 id 的完整记录，
/// Location 指向对应的 get-by-id 端点。
/// 请求体缺失或无法解析时交给仓储按"输入缺失"处理（400）
pub async fn add_customer(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<CustomerPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = match payload {
        Some(Json(payload)) => {
            payload.validate().map_err(ApiError::BadRequest)?;
            Some(payload.into_draft())
        }
        None => None,
    };

    let id = state.customer_repo.add(draft).await?;
    let created = state.customer_repo.find_by_id(id).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/customers/{}", id))],
        Json(CustomerResponse::from(created)),
    ))
}

/// 修改客户（按 id 整体覆盖，可通过 isActive 恢复或停用）
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if payload.id != Some(id) {
        return Err(ApiError::BadRequest(
            "ID in URL does not match ID in request body".to_string(),
        ));
    }
    payload.validate().map_err(ApiError::BadRequest)?;

    let record = payload.into_record(id);
    let response = CustomerResponse::from(record.clone());
    state.customer_repo.update(record).await?;

    Ok(Json(response))
}

/// 删除客户（软删除），成功返回 204 空响应体
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.customer_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
