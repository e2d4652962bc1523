use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument};

use super::domain::{IsAdminInput, LoginInput, RegisterInput};
use super::errors::{AuthError, StorageError};
use super::password::{Argon2Hasher, CredentialHasher};
use super::repository::AuthRepository;
use super::token::{JwtIssuer, TokenIssuer};

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_ttl: Duration::from_secs(3600) }
    }
}

/// Auth business service independent of web framework.
///
/// Stateless apart from its collaborators; share it behind an `Arc`.
pub struct AuthService<R: AuthRepository, H: CredentialHasher = Argon2Hasher, T: TokenIssuer = JwtIssuer> {
    repo: Arc<R>,
    hasher: H,
    issuer: T,
    cfg: AuthConfig,
    /// Verified against when the email is unknown, so that path costs one
    /// hash verification like a wrong password does.
    dummy_hash: Option<Vec<u8>>,
}

const DUMMY_PASSWORD: &str = "sso-unknown-account";

impl<R: AuthRepository> AuthService<R> {
    /// Argon2id with crate defaults and HS256 tokens.
    pub fn with_defaults(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self::new(repo, Argon2Hasher::default(), JwtIssuer, cfg)
    }
}

impl<R: AuthRepository, H: CredentialHasher, T: TokenIssuer> AuthService<R, H, T> {
    pub fn new(repo: Arc<R>, hasher: H, issuer: T, cfg: AuthConfig) -> Self {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD).ok();
        Self { repo, hasher, issuer, cfg, dummy_hash }
    }

    fn verify_dummy(&self, password: &str) {
        if let Some(hash) = &self.dummy_hash {
            let _ = self.hasher.verify(hash, password);
        }
    }

    /// Register a new account and return its id.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, AuthError, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::with_defaults(Arc::new(MockAuthRepository::default()), AuthConfig::default());
    /// let input = RegisterInput { email: "a@x.com".into(), password: "secret1".into() };
    /// assert_eq!(tokio_test::block_on(svc.register(input.clone())), Ok(1));
    /// assert_eq!(tokio_test::block_on(svc.register(input)), Err(AuthError::UserExists));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<i64, AuthError> {
        if input.email.trim().is_empty() {
            return Err(AuthError::InvalidInput("email is required".into()));
        }
        if input.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".into()));
        }

        let pass_hash = self.hasher.hash(&input.password).map_err(|e| {
            error!(error = %e, "failed to generate password hash");
            AuthError::Hash(e)
        })?;

        match self.repo.save_account(&input.email, pass_hash).await {
            Ok(user_id) => {
                info!(user_id, "user registered");
                Ok(user_id)
            }
            Err(StorageError::AlreadyExists) => {
                debug!("user already exists");
                Err(AuthError::UserExists)
            }
            Err(e) => {
                error!(error = %e, "failed to save user");
                Err(AuthError::Storage(e))
            }
        }
    }

    /// Verify credentials and mint a token for `input.app_id`.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, AuthError, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// tokio_test::block_on(repo.insert_app(7, "billing", b"billing-secret"));
    /// let svc = AuthService::with_defaults(repo, AuthConfig::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "a@x.com".into(), password: "secret1".into() }));
    /// let token = tokio_test::block_on(svc.login(LoginInput { email: "a@x.com".into(), password: "secret1".into(), app_id: 7 })).unwrap();
    /// assert_eq!(token.split('.').count(), 3);
    /// let err = tokio_test::block_on(svc.login(LoginInput { email: "a@x.com".into(), password: "wrong".into(), app_id: 7 }));
    /// assert_eq!(err, Err(AuthError::InvalidCredentials));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, app_id = input.app_id))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        debug!("attempting to login user");

        let account = match self.repo.find_account_by_email(&input.email).await {
            Ok(account) => account,
            Err(StorageError::NotFound) => {
                debug!("user not found");
                self.verify_dummy(&input.password);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!(error = %e, "failed to get user");
                return Err(AuthError::Storage(e));
            }
        };

        let matches = self.hasher.verify(&account.pass_hash, &input.password).map_err(|e| {
            error!(user_id = account.id, error = %e, "stored password hash is unusable");
            AuthError::Hash(e)
        })?;
        if !matches {
            debug!(user_id = account.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.repo.find_application(input.app_id).await {
            Ok(app) => app,
            Err(StorageError::NotFound) => {
                error!("login for an application that is not provisioned");
                return Err(AuthError::UnknownApplication(input.app_id));
            }
            Err(e) => {
                error!(error = %e, "failed to get app");
                return Err(AuthError::Storage(e));
            }
        };

        let token = self.issuer.issue(&account, &app, self.cfg.token_ttl).map_err(|e| {
            error!(error = %e, "failed to generate token");
            AuthError::Token(e)
        })?;

        info!(user_id = account.id, "user logged in successfully");
        Ok(token)
    }

    /// Report whether the account holds the administrator flag.
    #[instrument(skip(self, input), fields(user_id = input.user_id))]
    pub async fn is_admin(&self, input: IsAdminInput) -> Result<bool, AuthError> {
        if input.user_id == 0 {
            return Err(AuthError::InvalidInput("user_id is required".into()));
        }

        match self.repo.is_admin(input.user_id).await {
            Ok(is_admin) => {
                debug!(is_admin, "checked if user is admin");
                Ok(is_admin)
            }
            Err(StorageError::NotFound) => Err(AuthError::UnknownAccount),
            Err(e) => {
                error!(error = %e, "failed to check if user is admin");
                Err(AuthError::Storage(e))
            }
        }
    }
}
