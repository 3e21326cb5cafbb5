//! Login flow.
//!
//! Validates a login request, transforms the submitted email, verifies the
//! password, stamps the user's last login, and picks the redirect target.
//!
//! Every credential failure surfaces as [`Error::InvalidCredentials`] so
//! callers cannot tell an unknown email from a wrong password.
//!
//! # Example
//!
//! ```
//! use kanbanlogiq::auth::{Authenticator, Blake3Cipher, CredentialCipher, LoginRequest};
//! use kanbanlogiq::role::Role;
//! use kanbanlogiq::routing::RouteTable;
//! use kanbanlogiq::storage::{NewUser, Storage};
//!
//! let storage = Storage::open_in_memory().unwrap();
//! let cipher = Blake3Cipher::new([42; 32]);
//! storage
//!     .insert_user(&NewUser::new("Anna", "anna@example.com", "pw", Role::Customer), &cipher)
//!     .unwrap();
//!
//! let routes = RouteTable::default();
//! let auth = Authenticator::new(&cipher, &storage, &routes);
//! let outcome = auth.login(&LoginRequest::new("anna@example.com", "pw")).unwrap();
//! assert_eq!(outcome.redirect, "/customer/home");
//! ```

mod cipher;

pub use cipher::{Blake3Cipher, CredentialCipher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::locale::Messages;
use crate::role::{Principal, Role};
use crate::routing::{login_redirect, RouteId, RouteTable};

/// A stored user as the directory returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// User identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Transformed email.
    pub email_ciphertext: String,
    /// Password digest.
    pub password_digest: String,
    /// Access level.
    pub role: Role,
    /// When the user last logged in successfully.
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// The record as an authenticated principal.
    #[must_use]
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id,
            name: self.name.clone(),
            role: self.role.clone(),
            last_login: self.last_login,
        }
    }
}

/// Where users are looked up and login times recorded.
pub trait UserDirectory {
    /// Find a user by transformed email.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_by_email_ciphertext(&self, ciphertext: &str) -> Result<Option<UserRecord>>;

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn record_login(&self, user_id: i64, at: DateTime<Utc>) -> Result<()>;
}

/// Submitted login form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email as typed.
    #[serde(default)]
    pub email: String,
    /// Password as typed.
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Create a request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check that both fields were filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::MissingField { field: "email" });
        }
        if self.password.is_empty() {
            return Err(Error::MissingField { field: "password" });
        }
        Ok(())
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    /// The now-authenticated user, with `last_login` updated.
    pub principal: Principal,
    /// Where to go next.
    pub route: RouteId,
    /// Concrete path for `route`.
    pub redirect: String,
}

/// Performs logins against a user directory.
#[derive(Debug)]
pub struct Authenticator<'a, C, D> {
    cipher: &'a C,
    directory: &'a D,
    routes: &'a RouteTable,
}

impl<'a, C: CredentialCipher, D: UserDirectory> Authenticator<'a, C, D> {
    /// Create an authenticator.
    #[must_use]
    pub fn new(cipher: &'a C, directory: &'a D, routes: &'a RouteTable) -> Self {
        Self {
            cipher,
            directory,
            routes,
        }
    }

    /// Attempt a login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for a blank field,
    /// [`Error::InvalidCredentials`] for an unknown email or wrong password,
    /// or a storage error if the directory fails.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
        request.validate()?;

        let ciphertext = self.cipher.encrypt(request.email.trim());
        let Some(user) = self.directory.find_by_email_ciphertext(&ciphertext)? else {
            debug!("login rejected: no matching account");
            return Err(Error::InvalidCredentials);
        };

        if !self
            .cipher
            .verify_password(&request.password, &user.password_digest)
        {
            debug!(user_id = user.id, "login rejected: password mismatch");
            return Err(Error::InvalidCredentials);
        }

        let now = Utc::now();
        self.directory.record_login(user.id, now)?;

        let mut principal = user.to_principal();
        principal.last_login = Some(now);

        let route = login_redirect(&principal.role);
        let redirect = self.routes.url_for(route).to_string();
        info!(user_id = principal.id, role = %principal.role, %redirect, "user logged in");

        Ok(LoginOutcome {
            principal,
            route,
            redirect,
        })
    }
}

/// User-facing message for a failed login, or `None` if the error is not a
/// login failure (e.g. the database is down).
#[must_use]
pub fn login_error_message(err: &Error, messages: &Messages) -> Option<String> {
    match err {
        Error::InvalidCredentials => Some(messages.login_failed.to_string()),
        Error::MissingField { field } => Some(messages.field_required(field)),
        _ => None,
    }
}
