use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Role;

/// Reports the identity carried by a valid access token.
pub async fn check_access(
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CheckAccessResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, caller.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckAccessResponseData {
    pub user_id: String,
    pub user_role: Role,
}

impl From<AuthenticatedUser> for CheckAccessResponseData {
    fn from(caller: AuthenticatedUser) -> Self {
        Self {
            user_id: caller.user_id.to_string(),
            user_role: caller.role,
        }
    }
}
