//! User roles and the authenticated principal.
//!
//! A role has two spellings in the wild: the display name shown in the UI
//! (`"Amministratore"`, `"Cliente"`) and the slug stored with the user
//! record (`"admin"`, `"customer"`). Both are matched exactly and
//! case-sensitively. Anything else is kept as [`Role::Unrecognized`] so
//! callers can decide what to do with it instead of losing it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name of the administrator role.
pub const ADMINISTRATOR_NAME: &str = "Amministratore";

/// Display name of the customer role.
pub const CUSTOMER_NAME: &str = "Cliente";

/// Slug of the administrator role.
pub const ADMINISTRATOR_SLUG: &str = "admin";

/// Slug of the customer role.
pub const CUSTOMER_SLUG: &str = "customer";

/// Access level of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Back-office staff.
    Administrator,
    /// A customer following their own orders.
    Customer,
    /// A role name that matched neither known spelling.
    Unrecognized(String),
}

impl Role {
    /// Parse a role from its display name.
    #[must_use]
    pub fn from_display_name(name: &str) -> Self {
        match name {
            ADMINISTRATOR_NAME => Self::Administrator,
            CUSTOMER_NAME => Self::Customer,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Parse a role from its stored slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            ADMINISTRATOR_SLUG => Self::Administrator,
            CUSTOMER_SLUG => Self::Customer,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The stored slug. Unrecognized roles keep their original text.
    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::Administrator => ADMINISTRATOR_SLUG,
            Self::Customer => CUSTOMER_SLUG,
            Self::Unrecognized(raw) => raw,
        }
    }

    /// The display name. Unrecognized roles keep their original text.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Administrator => ADMINISTRATOR_NAME,
            Self::Customer => CUSTOMER_NAME,
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Check if this is one of the known roles.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The authenticated user a request acts on behalf of.
///
/// Passed explicitly into anything that needs to know who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Access level.
    pub role: Role,
    /// When the user last logged in successfully.
    pub last_login: Option<DateTime<Utc>>,
}

impl Principal {
    /// Create a principal that has never logged in.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            last_login: None,
        }
    }

    /// The role's display name, as the UI shows it.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_display_name_known() {
        assert_eq!(Role::from_display_name("Amministratore"), Role::Administrator);
        assert_eq!(Role::from_display_name("Cliente"), Role::Customer);
    }

    #[test]
    fn test_from_display_name_is_case_sensitive() {
        assert_eq!(
            Role::from_display_name("cliente"),
            Role::Unrecognized("cliente".to_string())
        );
        assert_eq!(
            Role::from_display_name("AMMINISTRATORE"),
            Role::Unrecognized("AMMINISTRATORE".to_string())
        );
    }

    #[test]
    fn test_from_slug() {
        assert_eq!(Role::from_slug("admin"), Role::Administrator);
        assert_eq!(Role::from_slug("customer"), Role::Customer);
        assert_eq!(
            Role::from_slug("warehouse"),
            Role::Unrecognized("warehouse".to_string())
        );
    }

    #[test]
    fn test_slug_and_display_name_round_trip() {
        for role in [Role::Administrator, Role::Customer] {
            assert_eq!(Role::from_slug(role.slug()), role);
            assert_eq!(Role::from_display_name(role.display_name()), role);
        }
    }

    #[test]
    fn test_unrecognized_keeps_raw_text() {
        let role = Role::Unrecognized("Magazziniere".to_string());
        assert_eq!(role.slug(), "Magazziniere");
        assert_eq!(role.to_string(), "Magazziniere");
        assert!(!role.is_recognized());
    }

    #[test]
    fn test_principal_role_name() {
        let principal = Principal::new(7, "Mario Rossi", Role::Customer);
        assert_eq!(principal.role_name(), "Cliente");
        assert!(principal.last_login.is_none());
    }
}
