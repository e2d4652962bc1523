//! Identity service core: account registration, login with per-application
//! access tokens, and privilege checks.
//! - Business rules live in `auth::service`, independent of transport.
//! - Persistence sits behind `auth::repository::AuthRepository`.

pub mod auth;
#[cfg(test)]
pub mod test_support;
