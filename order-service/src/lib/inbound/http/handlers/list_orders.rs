use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::create_order::OrderData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::OrderFilter;
use crate::domain::order::models::OrderStatus;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(status): Path<i16>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    let status = OrderStatus::try_from(status).map_err(OrderError::from)?;

    let mut filter = OrderFilter::new(status);
    // Blank query values mean "no constraint"
    if let Some(phone) = query.phone.filter(|p| !p.is_empty()) {
        filter = filter.with_phone(phone);
    }
    if let Some(email) = query.email.filter(|e| !e.is_empty()) {
        filter = filter.with_email(email);
    }

    state
        .order_service
        .list_orders(&caller, filter)
        .await
        .map_err(ApiError::from)
        .map(|orders| ApiSuccess::new(StatusCode::OK, orders.iter().map(OrderData::from).collect()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersQuery {
    phone: Option<String>,
    email: Option<String>,
}
