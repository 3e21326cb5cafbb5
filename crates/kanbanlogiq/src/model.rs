//! Core record types for kanbanlogiq.
//!
//! Orders, their line items, and the installation trays tracked against
//! them. These are plain data; the storage layer fills them and the
//! progress and rendering modules read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::QuantityPair;

/// A line item of an order: how many units were ordered and how many
/// have been fulfilled so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Identifier assigned by the storage layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Units ordered.
    pub quantity_ordered: f64,
    /// Units shipped.
    pub quantity_fulfilled: f64,
}

impl OrderItem {
    /// Create a new, unsaved order item.
    #[must_use]
    pub fn new(quantity_ordered: f64, quantity_fulfilled: f64) -> Self {
        Self {
            id: None,
            quantity_ordered,
            quantity_fulfilled,
        }
    }

    /// The item as a `(total, completed)` pair.
    #[must_use]
    pub fn quantities(&self) -> QuantityPair {
        QuantityPair::new(self.quantity_ordered, self.quantity_fulfilled)
    }
}

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the storage layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Human-facing order code.
    pub code: String,
    /// Owning customer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Line items.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Create a new, unsaved order with no items.
    #[must_use]
    pub fn new(code: impl Into<String>, customer_id: Option<i64>) -> Self {
        Self {
            id: None,
            code: code.into(),
            customer_id,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Add a line item.
    #[must_use]
    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Aggregate ordered vs. fulfilled quantities across every item.
    #[must_use]
    pub fn quantities(&self) -> QuantityPair {
        self.items.iter().map(OrderItem::quantities).sum()
    }
}

/// An installation tray: a physical container with a capacity and a
/// current fill level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationItem {
    /// Identifier assigned by the storage layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Order the tray belongs to.
    pub order_id: i64,
    /// Tray type, e.g. `"Grande"`. Drives the styling class.
    pub tray_type: String,
    /// Units currently in the tray. Zero means empty.
    pub status: i64,
    /// Tray capacity.
    pub quantity: i64,
    /// Barcode printed on the tray.
    pub barcode: String,
}

impl InstallationItem {
    /// Create a new, unsaved tray.
    #[must_use]
    pub fn new(
        order_id: i64,
        tray_type: impl Into<String>,
        status: i64,
        quantity: i64,
        barcode: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            order_id,
            tray_type: tray_type.into(),
            status,
            quantity,
            barcode: barcode.into(),
        }
    }

    /// Check if the tray holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == 0
    }
}
