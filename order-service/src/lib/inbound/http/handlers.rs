use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::order::errors::OrderError;
use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::CredentialStoreError;

pub mod check_access;
pub mod create_order;
pub mod list_orders;
pub mod login;
pub mod refresh;
pub mod register;
pub mod update_order_status;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                // Internal details stay in the log
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidUsername(_)
            | AuthError::InvalidRole(_)
            | AuthError::EmptyPassword => ApiError::UnprocessableEntity(err.to_string()),
            // Kept distinct on the wire, which allows username enumeration
            AuthError::UserNotFound(_) => ApiError::Unauthorized("user not found".to_string()),
            AuthError::IncorrectPassword => {
                ApiError::Unauthorized("incorrect password".to_string())
            }
            AuthError::ExpiredAccessToken => {
                ApiError::Unauthorized("access token expired".to_string())
            }
            AuthError::ExpiredRefreshToken => {
                ApiError::Unauthorized("refresh token expired".to_string())
            }
            AuthError::MalformedToken(_) | AuthError::InvalidSignature => {
                ApiError::Unauthorized("invalid token".to_string())
            }
            AuthError::Storage(CredentialStoreError::UsernameTaken(_)) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::CorruptCredential(_)
            | AuthError::Storage(CredentialStoreError::Database(_))
            | AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidIdentifier(_) | OrderError::InvalidStatus(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            OrderError::NotFound(_) => ApiError::NotFound(err.to_string()),
            OrderError::ProductNotFound(_) => ApiError::UnprocessableEntity(err.to_string()),
            OrderError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            OrderError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
