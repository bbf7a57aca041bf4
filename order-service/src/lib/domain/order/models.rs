use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::order::errors::IdentifierError;
use crate::domain::order::errors::OrderStatusError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Order unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an order ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentifierError> {
        Uuid::parse_str(s)
            .map(OrderId)
            .map_err(|e| IdentifierError::InvalidFormat(e.to_string()))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Catalog product identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentifierError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| IdentifierError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Processing stage of an order.
///
/// Persisted as a small integer in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Consideration,
    Rejected,
    AtWork,
    Complete,
}

impl OrderStatus {
    /// Numeric code used in storage, paths, and request bodies.
    pub fn code(&self) -> i16 {
        match self {
            OrderStatus::Consideration => 0,
            OrderStatus::Rejected => 1,
            OrderStatus::AtWork => 2,
            OrderStatus::Complete => 3,
        }
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = OrderStatusError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderStatus::Consideration),
            1 => Ok(OrderStatus::Rejected),
            2 => Ok(OrderStatus::AtWork),
            3 => Ok(OrderStatus::Complete),
            other => Err(OrderStatusError::UnknownCode(other)),
        }
    }
}

/// Catalog entry an order is placed against.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub weight_kg: f64,
    pub description: String,
}

/// Customer order aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub created_by: UserId,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub product: Product,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Command to register a customer order.
#[derive(Debug, Clone)]
pub struct NewOrderCommand {
    pub phone: String,
    pub email: String,
    pub description: String,
    pub product_id: ProductId,
}

/// Order ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub id: OrderId,
    pub created_by: UserId,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub product_id: ProductId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Listing criteria; phone and email narrow the result independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: OrderStatus,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl OrderFilter {
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status,
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Check whether an order satisfies every set criterion.
    pub fn matches(&self, order: &Order) -> bool {
        order.status == self.status
            && self.phone.as_deref().map_or(true, |phone| order.phone == phone)
            && self.email.as_deref().map_or(true, |email| order.email == email)
    }
}

/// Which orders a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    CreatedBy(UserId),
}

impl OrderScope {
    /// Directors see every order, employees only the ones they created.
    pub fn for_caller(caller: &AuthenticatedUser) -> Self {
        match caller.role {
            Role::Director => OrderScope::All,
            Role::Employee => OrderScope::CreatedBy(caller.user_id),
        }
    }

    pub fn includes(&self, order: &Order) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::CreatedBy(user_id) => order.created_by == *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(created_by: UserId, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(),
            created_by,
            phone: "+15550100".to_string(),
            email: "buyer@example.com".to_string(),
            description: "two pallets".to_string(),
            product: Product {
                id: ProductId::new(),
                name: "Cement".to_string(),
                weight_kg: 50.0,
                description: "Portland cement".to_string(),
            },
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_codes() {
        for status in [
            OrderStatus::Consideration,
            OrderStatus::Rejected,
            OrderStatus::AtWork,
            OrderStatus::Complete,
        ] {
            assert_eq!(OrderStatus::try_from(status.code()), Ok(status));
        }
        assert_eq!(
            OrderStatus::try_from(4),
            Err(OrderStatusError::UnknownCode(4))
        );
    }

    #[test]
    fn test_filter_matches_independently() {
        let order = order(UserId::new(), OrderStatus::AtWork);

        assert!(OrderFilter::new(OrderStatus::AtWork).matches(&order));
        assert!(!OrderFilter::new(OrderStatus::Complete).matches(&order));
        assert!(OrderFilter::new(OrderStatus::AtWork)
            .with_email("buyer@example.com")
            .matches(&order));
        assert!(!OrderFilter::new(OrderStatus::AtWork)
            .with_email("someone@example.com")
            .matches(&order));
        assert!(!OrderFilter::new(OrderStatus::AtWork)
            .with_phone("+15550100")
            .with_email("someone@example.com")
            .matches(&order));
    }

    #[test]
    fn test_scope_for_caller() {
        let employee = AuthenticatedUser {
            user_id: UserId::new(),
            role: Role::Employee,
        };
        let director = AuthenticatedUser {
            user_id: UserId::new(),
            role: Role::Director,
        };

        let own = order(employee.user_id, OrderStatus::Consideration);
        let foreign = order(director.user_id, OrderStatus::Consideration);

        let employee_scope = OrderScope::for_caller(&employee);
        assert_eq!(employee_scope, OrderScope::CreatedBy(employee.user_id));
        assert!(employee_scope.includes(&own));
        assert!(!employee_scope.includes(&foreign));

        let director_scope = OrderScope::for_caller(&director);
        assert!(director_scope.includes(&own));
        assert!(director_scope.includes(&foreign));
    }
}
