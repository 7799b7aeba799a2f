//! Database abstraction layer for the car registry
//!
//! This module provides a unified interface for car persistence across
//! the supported database backends (PostgreSQL, SQLite) while keeping the
//! SQL dialect differences in the store specific modules.
//!
//! # Architecture
//!
//! ```text
//! Common logic (car_insert.rs, car_update.rs, car_rows.rs, ...)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod car_delete;
pub mod car_insert;
pub mod car_read;
pub mod car_rows;
pub mod car_update;
pub mod config;
pub mod postgres;
pub mod sqlite;

// Re-export key types for convenience
pub use config::DatabaseBackendConfig;

pub use car_delete::UnifiedCarDeleteOps;
pub use car_insert::UnifiedCarInsertOps;
pub use car_read::UnifiedCarReadOps;
pub use car_update::UnifiedCarUpdateOps;

pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;
