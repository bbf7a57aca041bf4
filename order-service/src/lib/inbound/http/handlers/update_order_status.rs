use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderStatus;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_order_status(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(order_id): Path<String>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<ApiSuccess<UpdateOrderStatusResponseData>, ApiError> {
    let order_id = OrderId::from_string(&order_id).map_err(OrderError::from)?;
    let status = OrderStatus::try_from(body.status).map_err(OrderError::from)?;

    state
        .order_service
        .update_order_status(&caller, &order_id, status)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateOrderStatusResponseData {
            id: order_id.to_string(),
            status: status.code(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateOrderStatusRequest {
    status: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOrderStatusResponseData {
    pub id: String,
    pub status: i16,
}
