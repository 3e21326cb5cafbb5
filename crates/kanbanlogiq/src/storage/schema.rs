//! `SQLite` schema definitions for kanbanlogiq.
//!
//! This module contains the SQL statements for creating and dropping
//! the database schema.

/// SQL statement to create the users table.
///
/// `email` holds the transformed address, never the plaintext.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL,
    last_login TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the orders table.
pub const CREATE_ORDERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    customer_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the order items table.
pub const CREATE_ORDER_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    quantity_ordered REAL NOT NULL,
    quantity_fulfilled REAL NOT NULL DEFAULT 0
)
";

/// SQL statement to create the installation items (trays) table.
pub const CREATE_INSTALLATION_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS installation_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    tray_type TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 0,
    quantity INTEGER NOT NULL,
    barcode TEXT NOT NULL
)
";

/// SQL statement to create an index on `customer_id` for per-customer listings.
pub const CREATE_ORDERS_CUSTOMER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)
";

/// SQL statement to create an index on `order_id` for loading order items.
pub const CREATE_ORDER_ITEMS_ORDER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)
";

/// SQL statement to create an index on `order_id` for loading trays.
pub const CREATE_INSTALLATION_ITEMS_ORDER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_installation_items_order ON installation_items(order_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_ORDERS_TABLE,
    CREATE_ORDER_ITEMS_TABLE,
    CREATE_INSTALLATION_ITEMS_TABLE,
    CREATE_ORDERS_CUSTOMER_INDEX,
    CREATE_ORDER_ITEMS_ORDER_INDEX,
    CREATE_INSTALLATION_ITEMS_ORDER_INDEX,
    CREATE_METADATA_TABLE,
];

/// Statements that drop every table, children first.
pub const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS installation_items",
    "DROP TABLE IF EXISTS order_items",
    "DROP TABLE IF EXISTS orders",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS metadata",
];
