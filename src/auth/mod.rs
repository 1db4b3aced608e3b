//! Authentication module for managing user sessions and credentials.
//!
//! This module provides:
//! - `SessionManager`: the session lifecycle - startup reconciliation,
//!   login, registration, and logout
//! - `CredentialStore`: pluggable persistent storage for the bearer token
//!
//! The token is reconciled from storage once per startup and removed from
//! storage before the in-memory session is cleared.

pub mod credentials;
pub mod session;

pub use credentials::{
    CredentialStore, FileCredentialStore, KeyringCredentialStore, MemoryCredentialStore,
};
pub use session::{AuthError, Navigation, Session, SessionAccess, SessionManager};
