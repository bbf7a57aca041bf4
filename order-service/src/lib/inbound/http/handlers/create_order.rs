use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::ProductId;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let product_id = ProductId::from_string(&body.product_id).map_err(OrderError::from)?;

    let command = NewOrderCommand {
        phone: body.phone,
        email: body.email,
        description: body.description,
        product_id,
    };

    state
        .order_service
        .create_order(&caller, command)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::CREATED, order.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateOrderRequest {
    phone: String,
    email: String,
    description: String,
    product_id: String,
}

/// Order as exposed over HTTP; status is the numeric code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderData {
    pub id: String,
    pub created_by: String,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub product: ProductData,
    pub status: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub description: String,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            created_by: order.created_by.to_string(),
            phone: order.phone.clone(),
            email: order.email.clone(),
            description: order.description.clone(),
            product: ProductData {
                id: order.product.id.to_string(),
                name: order.product.name.clone(),
                weight: order.product.weight_kg,
                description: order.product.description.clone(),
            },
            status: order.status.code(),
            created_at: order.created_at,
        }
    }
}
