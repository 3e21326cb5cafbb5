//! Demo data for a freshly rebuilt database.

use serde::Serialize;
use tracing::info;

use super::{NewUser, Storage};
use crate::auth::CredentialCipher;
use crate::error::Result;
use crate::model::{InstallationItem, Order, OrderItem};
use crate::role::Role;

/// Email of the seeded administrator.
pub const DEMO_ADMIN_EMAIL: &str = "admin@kanbanlogiq.local";

/// Email of the seeded customer.
pub const DEMO_CUSTOMER_EMAIL: &str = "cliente@kanbanlogiq.local";

/// Password shared by the seeded accounts.
pub const DEMO_PASSWORD: &str = "password";

/// What [`seed_demo_data`] created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Users created.
    pub users: usize,
    /// Orders created.
    pub orders: usize,
    /// Trays created.
    pub trays: usize,
}

/// Populate the database with an administrator, a customer, and a few
/// orders covering every progress state.
///
/// # Errors
///
/// Returns an error if any insert fails, e.g. because the data was
/// already seeded.
pub fn seed_demo_data(storage: &Storage, cipher: &impl CredentialCipher) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    storage.insert_user(
        &NewUser::new("Amministratore", DEMO_ADMIN_EMAIL, DEMO_PASSWORD, Role::Administrator),
        cipher,
    )?;
    let customer = storage.insert_user(
        &NewUser::new("Cliente Demo", DEMO_CUSTOMER_EMAIL, DEMO_PASSWORD, Role::Customer),
        cipher,
    )?;
    summary.users = 2;

    let orders = [
        // Nothing shipped yet
        Order::new("ORD-0001", Some(customer))
            .with_item(OrderItem::new(40.0, 0.0))
            .with_item(OrderItem::new(10.0, 0.0)),
        // Partially shipped
        Order::new("ORD-0002", Some(customer))
            .with_item(OrderItem::new(100.0, 35.0))
            .with_item(OrderItem::new(50.0, 50.0)),
        // Fully shipped
        Order::new("ORD-0003", Some(customer)).with_item(OrderItem::new(12.0, 12.0)),
        // Not yet measured
        Order::new("ORD-0004", None),
    ];

    let mut order_ids = Vec::with_capacity(orders.len());
    for order in &orders {
        order_ids.push(storage.insert_order(order)?);
    }
    summary.orders = order_ids.len();

    let trays = [
        (order_ids[0], "Grande", 0, 24, "8000000000017"),
        (order_ids[1], "Grande", 24, 24, "8000000000024"),
        (order_ids[1], "Piccola", 5, 12, "8000000000031"),
        (order_ids[1], "Piccola", 0, 12, "8000000000048"),
        (order_ids[2], "Media", 12, 18, "8000000000055"),
    ];
    for (order_id, tray_type, status, quantity, barcode) in trays {
        storage.insert_tray(&InstallationItem::new(
            order_id, tray_type, status, quantity, barcode,
        ))?;
    }
    summary.trays = trays.len();

    info!(
        users = summary.users,
        orders = summary.orders,
        trays = summary.trays,
        "seeded demo data"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, Blake3Cipher, LoginRequest};
    use crate::routing::RouteTable;

    #[test]
    fn test_seed_counts_match_stats() {
        let storage = Storage::open_in_memory().unwrap();
        let cipher = Blake3Cipher::for_tests([5; 32]);

        let summary = seed_demo_data(&storage, &cipher).unwrap();
        let stats = storage.stats().unwrap();

        assert_eq!(usize::try_from(stats.users).unwrap(), summary.users);
        assert_eq!(usize::try_from(stats.orders).unwrap(), summary.orders);
        assert_eq!(usize::try_from(stats.trays).unwrap(), summary.trays);
    }

    #[test]
    fn test_seeded_accounts_can_log_in() {
        let storage = Storage::open_in_memory().unwrap();
        let cipher = Blake3Cipher::for_tests([5; 32]);
        seed_demo_data(&storage, &cipher).unwrap();

        let routes = RouteTable::default();
        let auth = Authenticator::new(&cipher, &storage, &routes);

        let admin = auth
            .login(&LoginRequest::new(DEMO_ADMIN_EMAIL, DEMO_PASSWORD))
            .unwrap();
        assert_eq!(admin.redirect, "/admin/home");

        let customer = auth
            .login(&LoginRequest::new(DEMO_CUSTOMER_EMAIL, DEMO_PASSWORD))
            .unwrap();
        assert_eq!(customer.redirect, "/customer/home");
    }

    #[test]
    fn test_seed_twice_fails_without_rebuild() {
        let storage = Storage::open_in_memory().unwrap();
        let cipher = Blake3Cipher::for_tests([5; 32]);

        seed_demo_data(&storage, &cipher).unwrap();
        assert!(seed_demo_data(&storage, &cipher).is_err());

        storage.rebuild().unwrap();
        assert!(seed_demo_data(&storage, &cipher).is_ok());
    }

    #[test]
    fn test_seed_covers_every_progress_state() {
        let storage = Storage::open_in_memory().unwrap();
        seed_demo_data(&storage, &Blake3Cipher::for_tests([5; 32])).unwrap();

        let percents: Vec<f64> = storage
            .list_orders(None)
            .unwrap()
            .iter()
            .filter(|o| !o.items.is_empty())
            .map(|o| o.quantities().percent())
            .collect();

        assert!(percents.iter().any(|p| *p == 0.0));
        assert!(percents.iter().any(|p| *p > 0.0 && *p < 100.0));
        assert!(percents.iter().any(|p| (*p - 100.0).abs() < f64::EPSILON));
    }
}
