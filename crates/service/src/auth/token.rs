//! Access token issuance.
//!
//! Tokens are HS256 JWTs signed with the secret of the application the user
//! logged in to. Any holder of that secret can verify them offline, so there
//! is no verify operation here.
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{Account, Application};

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub email: String,
    pub app_id: i32,
    /// Unix seconds.
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("application {0} has an empty signing secret")]
    EmptySecret(i32),
    #[error("ttl out of range: {0}")]
    Ttl(String),
    #[error("encoding failed: {0}")]
    Encode(String),
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account, app: &Application, ttl: Duration) -> Result<String, TokenError>;
}

/// HMAC-SHA256 JWT issuer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtIssuer;

impl JwtIssuer {
    pub const ALGORITHM: Algorithm = Algorithm::HS256;
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, account: &Account, app: &Application, ttl: Duration) -> Result<String, TokenError> {
        if app.secret.is_empty() {
            return Err(TokenError::EmptySecret(app.id));
        }
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| TokenError::Ttl(e.to_string()))?;
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Ttl("expiry overflows".into()))?
            .timestamp();
        let claims = Claims { uid: account.id, email: account.email.clone(), app_id: app.id, exp };
        encode(&Header::new(Self::ALGORITHM), &claims, &EncodingKey::from_secret(&app.secret))
            .map_err(|e| TokenError::Encode(e.to_string()))
    }
}
