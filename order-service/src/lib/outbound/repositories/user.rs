use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::errors::CredentialStoreError;
use crate::domain::user::models::Credential;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    user_id: Uuid,
    role: i16,
    username: String,
    pass_hash: String,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialStoreError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let role = Role::try_from(row.role)
            .map_err(|e| CredentialStoreError::Database(format!("Corrupt users row: {}", e)))?;
        let username = Username::new(row.username)
            .map_err(|e| CredentialStoreError::Database(format!("Corrupt users row: {}", e)))?;

        Ok(Credential {
            user_id: UserId(row.user_id),
            role,
            username,
            password_hash: row.pass_hash,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, role, username, pass_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Database(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn insert(&self, credential: NewCredential) -> Result<UserId, CredentialStoreError> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (role, username, pass_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind(credential.role.code())
        .bind(credential.username.as_str())
        .bind(&credential.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CredentialStoreError::UsernameTaken(
                        credential.username.as_str().to_string(),
                    );
                }
            }
            CredentialStoreError::Database(e.to_string())
        })?;

        Ok(UserId(user_id))
    }
}
