//! `kanbanlogiq` - Order and installation tray tracking with role-based views
//!
//! This library provides the core of the kanbanlogiq back office: role-based
//! landing routes, order and tray progress widgets, navigation and CSV label
//! helpers, the login flow, and `SQLite` storage for users, orders, and trays.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod locale;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod progress;
pub mod render;
pub mod role;
pub mod routing;
pub mod storage;


pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{InstallationItem, Order, OrderItem};
pub use progress::{classify, percent, StatusLevel};
pub use render::{render_order_progress, render_tray};
pub use role::{Principal, Role};
pub use routing::{resolve_home_route, RouteId};
pub use storage::{Storage, StorageStats};
