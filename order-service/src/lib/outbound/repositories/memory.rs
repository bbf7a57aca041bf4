use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderFilter;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderScope;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::Product;
use crate::domain::order::models::ProductId;
use crate::domain::order::ports::OrderRepository;
use crate::domain::user::errors::CredentialStoreError;
use crate::domain::user::models::Credential;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialRepository;

/// Credential store kept in process memory, keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self
            .credentials
            .read()
            .await
            .get(username.as_str())
            .cloned())
    }

    async fn insert(&self, credential: NewCredential) -> Result<UserId, CredentialStoreError> {
        let mut credentials = self.credentials.write().await;

        // Check and insert under one write guard
        if credentials.contains_key(credential.username.as_str()) {
            return Err(CredentialStoreError::UsernameTaken(
                credential.username.as_str().to_string(),
            ));
        }

        let user_id = UserId::new();
        credentials.insert(
            credential.username.as_str().to_string(),
            Credential {
                user_id,
                role: credential.role,
                username: credential.username,
                password_hash: credential.password_hash,
            },
        );

        Ok(user_id)
    }
}

/// Order store and product catalog kept in process memory.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a catalog product.
    pub async fn add_product(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderError> {
        let product = self
            .products
            .read()
            .await
            .get(&order.product_id)
            .cloned()
            .ok_or(OrderError::ProductNotFound(order.product_id.to_string()))?;

        let created = Order {
            id: order.id,
            created_by: order.created_by,
            phone: order.phone,
            email: order.email,
            description: order.description,
            product,
            status: order.status,
            created_at: order.created_at,
        };

        self.orders.write().await.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|order| order.id == *id)
            .cloned())
    }

    async fn find(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| scope.includes(order) && filter.matches(order))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| order.id == *id)
            .ok_or(OrderError::NotFound(id.to_string()))?;
        order.status = status;

        Ok(())
    }
}
