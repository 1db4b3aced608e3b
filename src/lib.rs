//! Client-side session management for token-authenticated HTTP APIs.
//!
//! This crate provides:
//! - `SessionManager`: login, registration, and logout against a remote
//!   auth service, plus a one-shot startup reconciliation from a stored token
//! - `CredentialStore`: pluggable persistent storage for the bearer token
//!   (plain file, OS keychain, or in-memory)
//! - `AuthClient`: thin HTTP client for the `/login`, `/register`, and
//!   `/user/me` endpoints
//!
//! The manager never performs routing itself; operations return a
//! [`Navigation`] intent the embedding application consumes.

pub mod api;
pub mod auth;
pub mod config;

pub use api::{ApiError, AuthClient};
pub use auth::{
    AuthError, CredentialStore, FileCredentialStore, KeyringCredentialStore,
    MemoryCredentialStore, Navigation, Session, SessionAccess, SessionManager,
};
pub use config::Config;
