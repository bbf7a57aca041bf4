use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::check_access::check_access;
use super::handlers::create_order::create_order;
use super::handlers::list_orders::list_orders;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::update_order_status::update_order_status;
use super::middleware::authenticate as auth_middleware;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::user::ports::AuthServicePort;

/// Application state shared by every handler; services are held behind their ports.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub order_service: Arc<dyn OrderServicePort>,
}

/// Transport settings applied to every route.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub index_file: PathBuf,
    /// Upper bound on reading the request and producing the response.
    pub request_timeout: Duration,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl HttpSettings {
    pub fn new(index_file: impl Into<PathBuf>) -> Self {
        Self {
            index_file: index_file.into(),
            request_timeout: Duration::from_secs(5),
            body_limit: 10 * 1024 * 1024,
        }
    }
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    order_service: Arc<dyn OrderServicePort>,
    settings: HttpSettings,
) -> Router {
    let state = AppState {
        auth_service,
        order_service,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh))
        .route_service("/api/v1/app", ServeFile::new(settings.index_file));

    let protected_routes = Router::new()
        .route("/api/v1/auth/access", get(check_access))
        .route("/api/v1/auth/registration", post(register))
        .route("/api/v1/orders/new-order", post(create_order))
        .route("/api/v1/orders/order/:order_id", post(update_order_status))
        .route("/api/v1/orders/:status", get(list_orders))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
