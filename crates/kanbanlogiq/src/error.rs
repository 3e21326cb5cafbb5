//! Error types for kanbanlogiq.
//!
//! This module defines all error types used throughout the kanbanlogiq crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kanbanlogiq operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// Identifier that was looked up.
        id: i64,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Authentication Errors ===
    /// A required login field was missing or blank.
    #[error("the {field} field is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Credentials did not match a known user.
    ///
    /// Carries no detail: unknown users and wrong passwords look the same.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The credential key could not be used.
    #[error("credential key error: {0}")]
    CredentialKey(String),

    /// A password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    // === Presentation Errors ===
    /// A CSV column descriptor carried no identifier.
    #[error("invalid column")]
    InvalidColumn,

    /// An HTML template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for kanbanlogiq operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new credential key error.
    #[must_use]
    pub fn credential_key(message: impl Into<String>) -> Self {
        Self::CredentialKey(message.into())
    }

    /// Create a new password hashing error.
    #[must_use]
    pub fn password_hash(message: impl Into<String>) -> Self {
        Self::PasswordHash(message.into())
    }

    /// Create a not-found error for the given entity kind.
    #[must_use]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Check if this error is a login failure that should be shown to the
    /// user as the generic "wrong email or password" message.
    #[must_use]
    pub fn is_login_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Check if this error is a request validation failure.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}
