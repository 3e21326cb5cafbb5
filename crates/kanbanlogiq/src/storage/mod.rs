//! Storage layer for kanbanlogiq.
//!
//! This module provides `SQLite`-based persistent storage for users,
//! orders, order items, and installation trays. It backs both the user
//! directory used by the login flow and the order lookups used by the
//! progress widgets.

pub mod migrations;
pub mod schema;
mod seed;

pub use seed::{
    seed_demo_data, SeedSummary, DEMO_ADMIN_EMAIL, DEMO_CUSTOMER_EMAIL, DEMO_PASSWORD,
};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::auth::{CredentialCipher, UserDirectory, UserRecord};
use crate::error::{Error, Result};
use crate::model::{InstallationItem, Order, OrderItem};
use crate::role::Role;

/// A user to be created.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Plaintext email. Only its transform is stored.
    pub email: String,
    /// Plaintext password. Only its digest is stored.
    pub password: String,
    /// Access level.
    pub role: Role,
}

impl NewUser {
    /// Describe a user to be created.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Storage engine for users, orders, and trays.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop and recreate every table. All data is lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be dropped or recreated.
    pub fn rebuild(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        migrations::drop_schema(&tx)?;
        migrations::initialize_schema(&tx)?;
        tx.commit()?;
        info!("Database rebuilt at {}", self.path.display());
        Ok(())
    }

    // === Users ===

    /// Create a user, storing only the transformed email and the password
    /// digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already taken or the insert fails.
    pub fn insert_user(&self, user: &NewUser, cipher: &impl CredentialCipher) -> Result<i64> {
        let email = cipher.encrypt(user.email.trim());
        let password = cipher.password_digest(&user.password)?;

        self.conn.execute(
            "INSERT INTO users (name, email, password, role) VALUES (?1, ?2, ?3, ?4)",
            params![user.name, email, password, user.role.slug()],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(user_id = id, role = %user.role, "inserted user");
        Ok(id)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_user(&self, id: i64) -> Result<Option<UserRecord>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, email, password, role, last_login FROM users WHERE id = ?1",
                [id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    // === Orders ===

    /// Insert an order together with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is already taken, the customer does not
    /// exist, or the insert fails.
    pub fn insert_order(&self, order: &Order) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO orders (code, customer_id, created_at) VALUES (?1, ?2, ?3)",
            params![order.code, order.customer_id, order.created_at.to_rfc3339()],
        )?;
        let order_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO order_items (order_id, quantity_ordered, quantity_fulfilled)
                 VALUES (?1, ?2, ?3)",
            )?;
            for item in &order.items {
                stmt.execute(params![
                    order_id,
                    item.quantity_ordered,
                    item.quantity_fulfilled
                ])?;
            }
        }

        tx.commit()?;
        debug!(order_id, items = order.items.len(), "inserted order");
        Ok(order_id)
    }

    /// Get an order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_order(&self, id: i64) -> Result<Option<Order>> {
        let order = self
            .conn
            .query_row(
                "SELECT id, code, customer_id, created_at FROM orders WHERE id = ?1",
                [id],
                Self::row_to_order,
            )
            .optional()?;

        match order {
            Some(mut order) => {
                order.items = self.order_items(id)?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// List orders, newest first, optionally restricted to one customer.
    ///
    /// Each order is returned with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_orders(&self, customer_id: Option<i64>) -> Result<Vec<Order>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, code, customer_id, created_at FROM orders
            WHERE ?1 IS NULL OR customer_id = ?1
            ORDER BY created_at DESC, id DESC
            ",
        )?;

        let mut orders = stmt
            .query_map([customer_id], Self::row_to_order)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for order in &mut orders {
            if let Some(id) = order.id {
                order.items = self.order_items(id)?;
            }
        }

        Ok(orders)
    }

    fn order_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, quantity_ordered, quantity_fulfilled FROM order_items
            WHERE order_id = ?1 ORDER BY id
            ",
        )?;

        let items = stmt
            .query_map([order_id], |row| {
                Ok(OrderItem {
                    id: Some(row.get(0)?),
                    quantity_ordered: row.get(1)?,
                    quantity_fulfilled: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Record shipped units for an order item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the item does not exist.
    pub fn set_quantity_fulfilled(&self, item_id: i64, quantity: f64) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE order_items SET quantity_fulfilled = ?1 WHERE id = ?2",
            params![quantity, item_id],
        )?;
        if affected == 0 {
            return Err(Error::not_found("order item", item_id));
        }
        Ok(())
    }

    // === Trays ===

    /// Insert an installation tray.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the order does not exist, or an error
    /// if the insert fails.
    pub fn insert_tray(&self, tray: &InstallationItem) -> Result<i64> {
        if !self.order_exists(tray.order_id)? {
            return Err(Error::not_found("order", tray.order_id));
        }

        self.conn.execute(
            r"
            INSERT INTO installation_items (order_id, tray_type, status, quantity, barcode)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                tray.order_id,
                tray.tray_type,
                tray.status,
                tray.quantity,
                tray.barcode
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(tray_id = id, order_id = tray.order_id, "inserted tray");
        Ok(id)
    }

    /// Trays belonging to an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn trays_for_order(&self, order_id: i64) -> Result<Vec<InstallationItem>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, order_id, tray_type, status, quantity, barcode
            FROM installation_items WHERE order_id = ?1 ORDER BY id
            ",
        )?;

        let trays = stmt
            .query_map([order_id], |row| {
                Ok(InstallationItem {
                    id: Some(row.get(0)?),
                    order_id: row.get(1)?,
                    tray_type: row.get(2)?,
                    status: row.get(3)?,
                    quantity: row.get(4)?,
                    barcode: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(trays)
    }

    /// Update how many units a tray holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the tray does not exist.
    pub fn set_tray_status(&self, tray_id: i64, status: i64) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE installation_items SET status = ?1 WHERE id = ?2",
            params![status, tray_id],
        )?;
        if affected == 0 {
            return Err(Error::not_found("tray", tray_id));
        }
        Ok(())
    }

    fn order_exists(&self, order_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM orders WHERE id = ?1",
            [order_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // === Statistics ===

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let count = |table: &str| -> Result<i64> {
            let n = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            users: count("users")?,
            orders: count("orders")?,
            order_items: count("order_items")?,
            trays: count("installation_items")?,
            schema_version: migrations::get_schema_version(&self.conn)?,
            db_size_bytes,
        })
    }

    // === Row mapping ===

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<UserRecord> {
        let last_login: Option<String> = row.get(5)?;
        let role_slug: String = row.get(4)?;

        Ok(UserRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email_ciphertext: row.get(2)?,
            password_digest: row.get(3)?,
            role: Role::from_slug(&role_slug),
            last_login: last_login.as_deref().and_then(parse_timestamp),
        })
    }

    fn row_to_order(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        let created_at: String = row.get(3)?;
        let created_at = parse_timestamp(&created_at).unwrap_or_else(|| {
            warn!("Unparseable order timestamp: {}, using now", created_at);
            Utc::now()
        });

        Ok(Order {
            id: Some(row.get(0)?),
            code: row.get(1)?,
            customer_id: row.get(2)?,
            created_at,
            items: Vec::new(),
        })
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl UserDirectory for Storage {
    fn find_by_email_ciphertext(&self, ciphertext: &str) -> Result<Option<UserRecord>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, email, password, role, last_login FROM users WHERE email = ?1",
                [ciphertext],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    fn record_login(&self, user_id: i64, at: DateTime<Utc>) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE users SET last_login = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), user_id],
        )?;
        if affected == 0 {
            return Err(Error::not_found("user", user_id));
        }
        Ok(())
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StorageStats {
    /// Number of users.
    pub users: i64,
    /// Number of orders.
    pub orders: i64,
    /// Number of order items.
    pub order_items: i64,
    /// Number of installation trays.
    pub trays: i64,
    /// Schema version recorded in the metadata table.
    pub schema_version: i32,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
