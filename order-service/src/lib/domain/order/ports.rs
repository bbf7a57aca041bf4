use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::NewOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderFilter;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderScope;
use crate::domain::order::models::OrderStatus;
use crate::domain::user::models::AuthenticatedUser;

/// Port for order domain service operations.
///
/// Every operation receives the caller resolved by the access gate.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    /// Register a new order against a catalog product.
    ///
    /// # Arguments
    /// * `caller` - Authenticated employee or director placing the order
    /// * `command` - Customer contact details, description, and product
    ///
    /// # Returns
    /// Created order in `Consideration` status
    ///
    /// # Errors
    /// * `ProductNotFound` - Product does not exist in the catalog
    /// * `DatabaseError` - Database operation failed
    async fn create_order(
        &self,
        caller: &AuthenticatedUser,
        command: NewOrderCommand,
    ) -> Result<Order, OrderError>;

    /// List orders visible to the caller.
    ///
    /// Directors see all orders; employees only the ones they created.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_orders(
        &self,
        caller: &AuthenticatedUser,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, OrderError>;

    /// Move an order to another status.
    ///
    /// # Errors
    /// * `NotFound` - Order does not exist
    /// * `Forbidden` - Employee attempted to modify an order they did not create
    /// * `DatabaseError` - Database operation failed
    async fn update_order_status(
        &self,
        caller: &AuthenticatedUser,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError>;
}

/// Persistence operations for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Persist a new order.
    ///
    /// # Returns
    /// Created order joined with its product
    ///
    /// # Errors
    /// * `ProductNotFound` - Referenced product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError>;

    /// Retrieve order by identifier.
    ///
    /// # Returns
    /// Optional order (None if not found)
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Retrieve orders within a scope matching a filter.
    async fn find(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, OrderError>;

    /// Change the status of an existing order.
    ///
    /// # Errors
    /// * `NotFound` - Order does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), OrderError>;
}
