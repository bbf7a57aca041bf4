use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::NewOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderFilter;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderScope;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::ports::OrderRepository;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::user::models::AuthenticatedUser;

/// Domain service implementation for order operations.
pub struct OrderService<OR>
where
    OR: OrderRepository,
{
    repository: Arc<OR>,
}

impl<OR> OrderService<OR>
where
    OR: OrderRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<OR> OrderServicePort for OrderService<OR>
where
    OR: OrderRepository,
{
    async fn create_order(
        &self,
        caller: &AuthenticatedUser,
        command: NewOrderCommand,
    ) -> Result<Order, OrderError> {
        let order = NewOrder {
            id: OrderId::new(),
            created_by: caller.user_id,
            phone: command.phone,
            email: command.email,
            description: command.description,
            product_id: command.product_id,
            status: OrderStatus::Consideration,
            created_at: Utc::now(),
        };

        let created = self.repository.create(order).await?;

        tracing::info!(
            order_id = %created.id,
            created_by = %caller.user_id,
            product_id = %created.product.id,
            "Order created"
        );

        Ok(created)
    }

    async fn list_orders(
        &self,
        caller: &AuthenticatedUser,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, OrderError> {
        let scope = OrderScope::for_caller(caller);
        self.repository.find(&scope, &filter).await
    }

    async fn update_order_status(
        &self,
        caller: &AuthenticatedUser,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id.to_string()))?;

        if !OrderScope::for_caller(caller).includes(&order) {
            tracing::warn!(
                order_id = %id,
                user_id = %caller.user_id,
                "Rejected status change on foreign order"
            );
            return Err(OrderError::Forbidden(id.to_string()));
        }

        self.repository.update_status(id, status).await?;

        tracing::info!(
            order_id = %id,
            from = order.status.code(),
            to = status.code(),
            "Order status updated"
        );

        Ok(())
    }
}
