//! Landing-route selection and route-to-URL mapping.
//!
//! Two decisions live here and they intentionally differ:
//!
//! - [`home_route`] picks the "home" link for an already-authenticated
//!   principal. Unknown roles land on the administrator home.
//! - [`login_redirect`] picks where to send a user right after login.
//!   Unknown roles land on the neutral [`RouteId::Home`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RoutesConfig;
use crate::role::{Principal, Role};

/// Abstract destination inside the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteId {
    /// Administrator dashboard.
    AdminHome,
    /// Customer dashboard.
    CustomerHome,
    /// Role-neutral landing page.
    Home,
    /// Login form.
    Login,
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdminHome => write!(f, "admin.home"),
            Self::CustomerHome => write!(f, "customer.home"),
            Self::Home => write!(f, "home"),
            Self::Login => write!(f, "login"),
        }
    }
}

/// Home route for a role.
///
/// Unrecognized roles fall back to [`RouteId::AdminHome`]. That fallback
/// grants the administrator landing page to anyone with an unexpected role
/// name, so it is logged every time it happens.
#[must_use]
pub fn home_route(role: &Role) -> RouteId {
    match role {
        Role::Administrator => RouteId::AdminHome,
        Role::Customer => RouteId::CustomerHome,
        Role::Unrecognized(name) => {
            warn!(role = %name, "unrecognized role, falling back to administrator home");
            RouteId::AdminHome
        }
    }
}

/// Home route for a role given by display name (`"Amministratore"`,
/// `"Cliente"`). Matching is exact and case-sensitive.
#[must_use]
pub fn resolve_home_route(role_name: &str) -> RouteId {
    home_route(&Role::from_display_name(role_name))
}

/// Home route for the given principal.
#[must_use]
pub fn home_route_for(principal: &Principal) -> RouteId {
    home_route(&principal.role)
}

/// Where to send a user after a successful login.
#[must_use]
pub fn login_redirect(role: &Role) -> RouteId {
    match role {
        Role::Administrator => RouteId::AdminHome,
        Role::Customer => RouteId::CustomerHome,
        Role::Unrecognized(_) => RouteId::Home,
    }
}

/// Maps abstract routes to concrete URL paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: RoutesConfig,
}

impl RouteTable {
    /// Build a table from configured paths.
    #[must_use]
    pub fn new(routes: RoutesConfig) -> Self {
        Self { routes }
    }

    /// Path for the given route.
    #[must_use]
    pub fn url_for(&self, route: RouteId) -> &str {
        match route {
            RouteId::AdminHome => &self.routes.admin_home,
            RouteId::CustomerHome => &self.routes.customer_home,
            RouteId::Home => &self.routes.home,
            RouteId::Login => &self.routes.login,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RoutesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;

    #[test]
    fn test_resolve_home_route_administrator() {
        assert_eq!(resolve_home_route("Amministratore"), RouteId::AdminHome);
    }

    #[test]
    fn test_resolve_home_route_customer() {
        assert_eq!(resolve_home_route("Cliente"), RouteId::CustomerHome);
    }

    #[test]
    fn test_resolve_home_route_unknown_falls_back_to_admin() {
        init_test_logging();
        assert_eq!(resolve_home_route("unknown"), RouteId::AdminHome);
        assert_eq!(resolve_home_route(""), RouteId::AdminHome);
        assert_eq!(resolve_home_route("cliente"), RouteId::AdminHome);
    }

    #[test]
    fn test_home_route_for_principal() {
        let customer = Principal::new(1, "Anna", Role::Customer);
        assert_eq!(home_route_for(&customer), RouteId::CustomerHome);

        let admin = Principal::new(2, "Luca", Role::Administrator);
        assert_eq!(home_route_for(&admin), RouteId::AdminHome);
    }

    #[test]
    fn test_login_redirect_by_role() {
        assert_eq!(login_redirect(&Role::Administrator), RouteId::AdminHome);
        assert_eq!(login_redirect(&Role::Customer), RouteId::CustomerHome);
        assert_eq!(
            login_redirect(&Role::Unrecognized("operator".to_string())),
            RouteId::Home
        );
    }

    #[test]
    fn test_route_table_defaults() {
        let table = RouteTable::default();
        assert_eq!(table.url_for(RouteId::AdminHome), "/admin/home");
        assert_eq!(table.url_for(RouteId::CustomerHome), "/customer/home");
        assert_eq!(table.url_for(RouteId::Home), "/home");
        assert_eq!(table.url_for(RouteId::Login), "/login");
    }

    #[test]
    fn test_route_table_custom_paths() {
        let table = RouteTable::new(RoutesConfig {
            admin_home: "/backoffice".to_string(),
            ..RoutesConfig::default()
        });
        assert_eq!(table.url_for(RouteId::AdminHome), "/backoffice");
        assert_eq!(table.url_for(RouteId::Home), "/home");
    }

    #[test]
    fn test_route_id_display() {
        assert_eq!(RouteId::AdminHome.to_string(), "admin.home");
        assert_eq!(RouteId::CustomerHome.to_string(), "customer.home");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for name in ["Amministratore", "Cliente", "???"] {
            assert_eq!(resolve_home_route(name), resolve_home_route(name));
        }
    }
}
