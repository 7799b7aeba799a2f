pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod startup;

// Re-export commonly used types for easier access
pub use backend::{CarBackend, DriverBackend, ManufacturerBackend, RegistryBackend};
pub use error::{AppError, AppResult};
pub use models::{Car, Driver, Manufacturer};
