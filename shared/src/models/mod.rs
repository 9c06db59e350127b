//! Data models
//!
//! Shared between the server and its HTTP clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod dining_table;
pub mod order;
pub mod product;
pub mod report;
pub mod shift;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use order::*;
pub use product::*;
pub use report::*;
pub use shift::*;
pub use user::*;
