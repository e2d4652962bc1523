use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::error;

use service::auth::domain::{IsAdminInput, LoginInput, RegisterInput};
use service::auth::password::CredentialHasher;
use service::auth::repository::AuthRepository;
use service::auth::token::TokenIssuer;
use service::auth::{AuthError, AuthService};

use crate::errors::ApiError;
use crate::metrics;

/// What the adapter needs from the domain layer.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, input: RegisterInput) -> Result<i64, AuthError>;
    async fn login(&self, input: LoginInput) -> Result<String, AuthError>;
    async fn is_admin(&self, input: IsAdminInput) -> Result<bool, AuthError>;
}

#[async_trait]
impl<R, H, T> AuthApi for AuthService<R, H, T>
where
    R: AuthRepository + 'static,
    H: CredentialHasher + 'static,
    T: TokenIssuer + 'static,
{
    async fn register(&self, input: RegisterInput) -> Result<i64, AuthError> {
        AuthService::register(self, input).await
    }

    async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        AuthService::login(self, input).await
    }

    async fn is_admin(&self, input: IsAdminInput) -> Result<bool, AuthError> {
        AuthService::is_admin(self, input).await
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<dyn AuthApi>,
    /// Deadline for one domain call, including its storage round trips.
    pub request_timeout: Duration,
}

impl ServerState {
    async fn call<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, AuthError>>,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let res = match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(res) => res.map_err(ApiError::from),
            Err(_) => {
                error!(op, timeout_ms = self.request_timeout.as_millis() as u64, "request deadline exceeded");
                Err(ApiError::Internal)
            }
        };
        metrics::record(op, &res, started.elapsed().as_secs_f64());
        res
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterOutput {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct IsAdminOutput {
    pub is_admin: bool,
}

fn required(missing: bool, field: &str) -> Result<(), ApiError> {
    if missing {
        return Err(ApiError::InvalidArgument(format!("{field} is required")));
    }
    Ok(())
}

pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<Json<RegisterOutput>, ApiError> {
    let Json(input) = payload?;
    required(input.email.is_empty(), "email")?;
    required(input.password.is_empty(), "password")?;

    let user_id = state.call("register", state.auth.register(input)).await?;
    Ok(Json(RegisterOutput { user_id }))
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    let Json(input) = payload?;
    required(input.email.is_empty(), "email")?;
    required(input.password.is_empty(), "password")?;
    required(input.app_id == 0, "app_id")?;

    let token = state.call("login", state.auth.login(input)).await?;
    Ok(Json(LoginOutput { token }))
}

pub async fn is_admin(
    State(state): State<ServerState>,
    payload: Result<Json<IsAdminInput>, JsonRejection>,
) -> Result<Json<IsAdminOutput>, ApiError> {
    let Json(input) = payload?;
    required(input.user_id == 0, "user_id")?;

    let is_admin = state.call("is_admin", state.auth.is_admin(input)).await?;
    Ok(Json(IsAdminOutput { is_admin }))
}
