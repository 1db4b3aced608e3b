//! Session lifecycle: startup reconciliation, login, registration, logout.
//!
//! The session is either unauthenticated or bound to an opaque user profile
//! backed by a stored bearer token. It flips to authenticated only after a
//! successful login followed by a successful profile fetch, and any failure
//! after the token was issued removes the token from storage before the
//! in-memory state is cleared.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthClient};
use crate::auth::CredentialStore;

/// Fallback error text when `/login` fails without a server message
const LOGIN_FAILED: &str = "Login failed";

/// Fallback error text when the post-login profile fetch fails silently
const FETCH_USER_FAILED: &str = "Failed to fetch user data";

/// Generic text for transport failures during login
const LOGIN_ERROR: &str = "An error occurred during login";

/// Fallback error text when `/register` fails without a server message
const REGISTER_FAILED: &str = "Registration failed";

/// Generic text for transport failures during registration
const REGISTER_ERROR: &str = "An error occurred during registration";

/// Client-side routing intent emitted by session operations.
///
/// The embedding application owns the actual navigation; routing failures
/// never flow back into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// After a successful login
    Profile,
    /// After logout
    Home,
    /// After a successful registration
    RegistrationSuccess,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::Profile => "/profile",
            Navigation::Home => "/",
            Navigation::RegistrationSuccess => "/success",
        }
    }
}

/// In-memory authentication state.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Unauthenticated,
    /// Profile payload as returned by the auth service. No fields are
    /// interpreted locally.
    Authenticated { user: Value },
}

impl Session {
    pub fn user(&self) -> Option<&Value> {
        match self {
            Session::Authenticated { user } => Some(user),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Operation failure carrying exactly the message shown to the user:
/// the server's own `message` when it sent one, otherwise an
/// operation-specific fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AuthError(String);

impl AuthError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Map an API failure to the caller-visible message: server message
/// verbatim, HTTP-level fallback, or transport fallback.
fn caller_message(err: &ApiError, http_fallback: &str, transport_fallback: &str) -> AuthError {
    match err {
        ApiError::Rejected { message } => AuthError::new(message.clone()),
        ApiError::Status { .. } => AuthError::new(http_fallback),
        ApiError::Network(_) => AuthError::new(transport_fallback),
    }
}

/// Capability interface over the session operations, for views and route
/// guards that take the session store by dependency injection.
#[allow(async_fn_in_trait)]
pub trait SessionAccess {
    fn session(&self) -> &Session;
    async fn login(&mut self, username: &str, password: &str) -> Result<Navigation, AuthError>;
    async fn register(&self, fields: &Value) -> Result<Navigation, AuthError>;
    fn logout(&mut self) -> Navigation;
}

/// Holds the current session and drives it through the remote auth service.
///
/// Constructed explicitly by the application's startup sequence; call
/// [`SessionManager::reconcile`] once before serving any views. Operations
/// take `&mut self`, so two operations cannot interleave on one manager.
pub struct SessionManager<S: CredentialStore> {
    api: AuthClient,
    store: S,
    session: Session,
    // Mirror of the stored credential, used only for authorization headers
    token: Option<String>,
}

impl<S: CredentialStore> SessionManager<S> {
    pub fn new(api: AuthClient, store: S) -> Self {
        Self {
            api,
            store,
            session: Session::Unauthenticated,
            token: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&Value> {
        self.session.user()
    }

    /// Rebuild the session from the stored token. Runs once at startup.
    ///
    /// Resolves silently: with no stored token the session stays
    /// unauthenticated and no request is issued; a token the service no
    /// longer accepts is removed from storage.
    pub async fn reconcile(&mut self) {
        let token = match self.store.get() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.set_unauthenticated();
                return;
            }
            Err(err) => {
                warn!(error = %err, "Failed to read stored token");
                self.set_unauthenticated();
                return;
            }
        };

        match self.api.fetch_current_user(&token).await {
            Ok(user) => {
                debug!("Session restored from stored token");
                self.token = Some(token);
                self.session = Session::Authenticated { user };
            }
            Err(err) => {
                debug!(error = %err, "Stored token no longer valid, clearing");
                self.remove_credential();
                self.set_unauthenticated();
            }
        }
    }

    /// Authenticate against the remote service.
    ///
    /// The issued token is written through to the credential store before
    /// the profile fetch; if that fetch fails the token is removed again
    /// and the session stays unauthenticated. A rejected `/login` leaves
    /// all state untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Navigation, AuthError> {
        let token = match self.api.login(username, password).await {
            Ok(token) => token,
            Err(err) => {
                debug!(username, error = %err, "Login rejected");
                return Err(caller_message(&err, LOGIN_FAILED, LOGIN_ERROR));
            }
        };

        if let Err(err) = self.store.set(&token) {
            warn!(error = %err, "Failed to persist token");
            return Err(AuthError::new(LOGIN_ERROR));
        }

        match self.api.fetch_current_user(&token).await {
            Ok(user) => {
                info!(username, "Login succeeded");
                self.token = Some(token);
                self.session = Session::Authenticated { user };
                Ok(Navigation::Profile)
            }
            Err(err) => {
                debug!(username, error = %err, "Profile fetch after login failed");
                self.remove_credential();
                self.set_unauthenticated();
                Err(caller_message(&err, FETCH_USER_FAILED, LOGIN_ERROR))
            }
        }
    }

    /// Register a new account. Success does not log the user in; the
    /// session is never touched here.
    pub async fn register(&self, fields: &Value) -> Result<Navigation, AuthError> {
        match self.api.register(fields).await {
            Ok(()) => {
                info!("Registration accepted");
                Ok(Navigation::RegistrationSuccess)
            }
            Err(err) => {
                debug!(error = %err, "Registration failed");
                Err(caller_message(&err, REGISTER_FAILED, REGISTER_ERROR))
            }
        }
    }

    /// Remove the stored credential and drop the session.
    ///
    /// Never fails from the caller's perspective: a store error is logged
    /// and the in-memory session still resets. Idempotent.
    pub fn logout(&mut self) -> Navigation {
        self.remove_credential();
        self.set_unauthenticated();
        info!("Logged out");
        Navigation::Home
    }

    fn set_unauthenticated(&mut self) {
        self.token = None;
        self.session = Session::Unauthenticated;
    }

    fn remove_credential(&mut self) {
        if let Err(err) = self.store.remove() {
            warn!(error = %err, "Failed to remove stored token");
        }
    }
}

impl<S: CredentialStore> SessionAccess for SessionManager<S> {
    fn session(&self) -> &Session {
        &self.session
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<Navigation, AuthError> {
        SessionManager::login(self, username, password).await
    }

    async fn register(&self, fields: &Value) -> Result<Navigation, AuthError> {
        SessionManager::register(self, fields).await
    }

    fn logout(&mut self) -> Navigation {
        SessionManager::logout(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_paths() {
        assert_eq!(Navigation::Profile.path(), "/profile");
        assert_eq!(Navigation::Home.path(), "/");
        assert_eq!(Navigation::RegistrationSuccess.path(), "/success");
    }

    #[test]
    fn test_session_accessors() {
        let unauth = Session::Unauthenticated;
        assert!(!unauth.is_authenticated());
        assert_eq!(unauth.user(), None);

        let user = serde_json::json!({"id": 1, "name": "alice"});
        let auth = Session::Authenticated { user: user.clone() };
        assert!(auth.is_authenticated());
        assert_eq!(auth.user(), Some(&user));
    }

    #[test]
    fn test_caller_message_precedence() {
        let rejected = ApiError::Rejected {
            message: "invalid credentials".to_string(),
        };
        assert_eq!(
            caller_message(&rejected, LOGIN_FAILED, LOGIN_ERROR).message(),
            "invalid credentials"
        );

        let status = ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            caller_message(&status, LOGIN_FAILED, LOGIN_ERROR).message(),
            LOGIN_FAILED
        );
    }
}
