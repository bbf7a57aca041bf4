use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::TokenPairResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::AuthError;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<TokenPairResponseData>, ApiError> {
    state
        .auth_service
        .refresh_tokens(&body.refresh)
        .await
        .map_err(|e| {
            if matches!(e, AuthError::MalformedToken(_) | AuthError::InvalidSignature) {
                tracing::warn!(error = %e, "Rejected forged or malformed refresh token");
            }
            ApiError::from(e)
        })
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh: String,
}
