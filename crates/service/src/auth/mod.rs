//! Auth module: three-layer architecture (domain, repository, service).
//!
//! The service orchestrates the repository, the credential hasher and the
//! token issuer into Register / Login / IsAdmin.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use errors::{AuthError, StorageError};
pub use service::{AuthConfig, AuthService};
