use thiserror::Error;

/// Error for OrderId and ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for OrderStatus decoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderStatusError {
    #[error("Unknown order status: {0}")]
    UnknownCode(i16),
}

/// Top-level error for all order-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] OrderStatusError),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Not allowed to modify order: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
