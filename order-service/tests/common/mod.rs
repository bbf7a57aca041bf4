#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use auth::Authenticator;
use auth::TokenLifetimes;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use order_service::domain::order::models::Product;
use order_service::domain::order::models::ProductId;
use order_service::domain::order::service::OrderService;
use order_service::domain::user::models::RegisterCommand;
use order_service::domain::user::models::Role;
use order_service::domain::user::models::UserId;
use order_service::domain::user::models::Username;
use order_service::domain::user::ports::Clock;
use order_service::domain::user::service::AuthService;
use order_service::inbound::http::router::create_router;
use order_service::inbound::http::router::HttpSettings;
use order_service::outbound::repositories::InMemoryOrderRepository;
use order_service::outbound::repositories::InMemoryUserRepository;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-at-least-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-at-least-32-bytes";

pub const DIRECTOR_USERNAME: &str = "director";
pub const DIRECTOR_PASSWORD: &str = "d1rector-pass";

/// Clock that only moves when a test advances it
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub type TestAuthService = AuthService<InMemoryUserRepository, ManualClock>;

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub auth_service: Arc<TestAuthService>,
    pub director_id: UserId,
    pub product: Product,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let clock = Arc::new(ManualClock::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());

        let product = Product {
            id: ProductId::new(),
            name: "Cement".to_string(),
            weight_kg: 50.0,
            description: "Portland cement".to_string(),
        };
        orders.add_product(product.clone()).await;

        let authenticator =
            Authenticator::new(ACCESS_SECRET, REFRESH_SECRET, TokenLifetimes::default())
                .expect("Failed to create authenticator");

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&clock),
            authenticator,
        ));
        let order_service = Arc::new(OrderService::new(Arc::clone(&orders)));

        // Registration requires a director, so the first one is bootstrapped
        let director_id = auth_service
            .ensure_account(RegisterCommand::new(
                Role::Director,
                Username::new(DIRECTOR_USERNAME.to_string()).unwrap(),
                DIRECTOR_PASSWORD.to_string(),
            ))
            .await
            .expect("Failed to seed director")
            .expect("Director already present");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let index_file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static/index.html");
        let router = create_router(
            auth_service.clone(),
            order_service,
            HttpSettings::new(index_file),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            clock,
            users,
            orders,
            auth_service,
            director_id,
            product,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in over HTTP and return (access, refresh)
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/v1/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["access"].as_str().unwrap().to_string(),
            body["data"]["refresh"].as_str().unwrap().to_string(),
        )
    }

    /// Log in as the seeded director and return the access token
    pub async fn director_token(&self) -> String {
        self.login(DIRECTOR_USERNAME, DIRECTOR_PASSWORD).await.0
    }

    /// Register an account through the director and return its id
    pub async fn register(&self, role: Role, username: &str, password: &str) -> String {
        let token = self.director_token().await;
        let response = self
            .post_authenticated("/api/v1/auth/registration", &token)
            .json(&serde_json::json!({
                "role_id": role.code(),
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["user_id"].as_str().unwrap().to_string()
    }

    /// Place an order for the seeded product and return its id
    pub async fn create_order(&self, token: &str, phone: &str) -> String {
        let response = self
            .post_authenticated("/api/v1/orders/new-order", token)
            .json(&serde_json::json!({
                "phone": phone,
                "email": "buyer@example.com",
                "description": "two pallets",
                "product_id": self.product.id.to_string()
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}
