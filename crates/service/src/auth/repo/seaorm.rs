use sea_orm::DatabaseConnection;

use crate::auth::domain::{Account, Application};
use crate::auth::errors::StorageError;
use crate::auth::repository::AuthRepository;

/// SeaORM-backed repository implementation.
///
/// Email uniqueness is left to the unique index on `users.email`; a
/// violation comes back as `StorageError::AlreadyExists`.
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn save_account(&self, email: &str, pass_hash: Vec<u8>) -> Result<i64, StorageError> {
        let created = models::user::create(&self.db, email, pass_hash).await?;
        Ok(created.id)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StorageError> {
        models::user::find_by_email(&self.db, email)
            .await?
            .map(Account::from)
            .ok_or(StorageError::NotFound)
    }

    async fn is_admin(&self, account_id: i64) -> Result<bool, StorageError> {
        models::user::find_by_id(&self.db, account_id)
            .await?
            .map(|u| u.is_admin)
            .ok_or(StorageError::NotFound)
    }

    async fn find_application(&self, app_id: i32) -> Result<Application, StorageError> {
        models::app::find_by_id(&self.db, app_id)
            .await?
            .map(Application::from)
            .ok_or(StorageError::NotFound)
    }
}
