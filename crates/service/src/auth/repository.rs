use async_trait::async_trait;

use super::domain::{Account, Application};
use super::errors::StorageError;

/// Persistence contract of the auth service.
///
/// Implementations must make `save_account` atomic with respect to email
/// uniqueness: of two concurrent inserts for one email, exactly one succeeds
/// and the other gets `StorageError::AlreadyExists`.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn save_account(&self, email: &str, pass_hash: Vec<u8>) -> Result<i64, StorageError>;
    async fn find_account_by_email(&self, email: &str) -> Result<Account, StorageError>;
    async fn is_admin(&self, account_id: i64) -> Result<bool, StorageError>;
    async fn find_application(&self, app_id: i32) -> Result<Application, StorageError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        accounts: HashMap<String, Account>, // key: email
        apps: HashMap<i32, Application>,
        last_id: i64,
        unavailable: bool,
    }

    #[derive(Default)]
    pub struct MockAuthRepository {
        state: Mutex<State>,
    }

    impl MockAuthRepository {
        pub async fn insert_app(&self, id: i32, name: &str, secret: &[u8]) {
            let app = Application { id, name: name.to_string(), secret: secret.to_vec() };
            self.state.lock().await.apps.insert(id, app);
        }

        /// Returns false when the account does not exist.
        pub async fn set_admin(&self, account_id: i64, is_admin: bool) -> bool {
            let mut state = self.state.lock().await;
            match state.accounts.values_mut().find(|a| a.id == account_id) {
                Some(account) => {
                    account.is_admin = is_admin;
                    true
                }
                None => false,
            }
        }

        /// Make every call fail as if the store went away.
        pub async fn set_unavailable(&self, unavailable: bool) {
            self.state.lock().await.unavailable = unavailable;
        }

        pub async fn account_count(&self) -> usize {
            self.state.lock().await.accounts.len()
        }
    }

    fn check(state: &State) -> Result<(), StorageError> {
        if state.unavailable {
            return Err(StorageError::Db("store unavailable".into()));
        }
        Ok(())
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn save_account(&self, email: &str, pass_hash: Vec<u8>) -> Result<i64, StorageError> {
            let mut state = self.state.lock().await;
            check(&state)?;
            if state.accounts.contains_key(email) {
                return Err(StorageError::AlreadyExists);
            }
            state.last_id += 1;
            let account = Account { id: state.last_id, email: email.to_string(), pass_hash, is_admin: false };
            state.accounts.insert(email.to_string(), account);
            Ok(state.last_id)
        }

        async fn find_account_by_email(&self, email: &str) -> Result<Account, StorageError> {
            let state = self.state.lock().await;
            check(&state)?;
            state.accounts.get(email).cloned().ok_or(StorageError::NotFound)
        }

        async fn is_admin(&self, account_id: i64) -> Result<bool, StorageError> {
            let state = self.state.lock().await;
            check(&state)?;
            state
                .accounts
                .values()
                .find(|a| a.id == account_id)
                .map(|a| a.is_admin)
                .ok_or(StorageError::NotFound)
        }

        async fn find_application(&self, app_id: i32) -> Result<Application, StorageError> {
            let state = self.state.lock().await;
            check(&state)?;
            state.apps.get(&app_id).cloned().ok_or(StorageError::NotFound)
        }
    }
}
