//! HTTP client module for the remote auth service.
//!
//! This module provides the `AuthClient` for communicating with the
//! backend's `/login`, `/register`, and `/user/me` endpoints.
//!
//! Authenticated requests use a bearer token obtained through `/login`.

pub mod client;
pub mod error;

pub use client::AuthClient;
pub use error::ApiError;
