use crate::error::AppResult;
use crate::models::{Car, Driver, Manufacturer};
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

/// Supported database backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

/// Core backend abstraction
///
/// Lifecycle operations any store implementation must provide before the
/// entity operations can be used.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect to the storage backend
    async fn connect(config: &crate::backend::database::DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create the manufacturers, drivers, cars and car_drivers tables if missing
    async fn init_schema(&self) -> AppResult<()>;

    /// Clean up resources when storage is no longer needed
    async fn cleanup(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Car repository operations
///
/// Cars flagged as deleted are invisible to every operation except
/// `delete_car` itself. Reads join through `car_drivers`, so a car
/// without any driver is not returned by them.
#[async_trait]
pub trait CarBackend: Backend {
    /// Insert the car row, then one association row per driver.
    /// Returns the car with its store-assigned id.
    async fn create_car(&self, car: &Car) -> AppResult<Car>;

    /// Find a live car by id with its manufacturer and drivers
    async fn find_car_by_id(&self, id: i64) -> AppResult<Option<Car>>;

    /// Find all live cars, one aggregate per car id
    async fn find_all_cars(&self) -> AppResult<Vec<Car>>;

    /// Find the live cars associated with the given driver
    async fn find_cars_by_driver(&self, driver_id: i64) -> AppResult<Vec<Car>>;

    /// Update model and manufacturer, then replace the whole driver set.
    /// Returns `None` if no live car has the given id.
    async fn update_car(&self, car: &Car) -> AppResult<Option<Car>>;

    /// Soft delete: flag the car as deleted. Association rows are kept.
    async fn delete_car(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait ManufacturerBackend: Backend {
    async fn create_manufacturer(&self, manufacturer: &Manufacturer) -> AppResult<Manufacturer>;

    async fn find_manufacturer_by_id(&self, id: i64) -> AppResult<Option<Manufacturer>>;

    async fn find_all_manufacturers(&self) -> AppResult<Vec<Manufacturer>>;
}

#[async_trait]
pub trait DriverBackend: Backend {
    async fn create_driver(&self, driver: &Driver) -> AppResult<Driver>;

    async fn find_driver_by_id(&self, id: i64) -> AppResult<Option<Driver>>;

    async fn find_all_drivers(&self) -> AppResult<Vec<Driver>>;
}

/// Combined backend interface for cars and the entities they reference
pub trait RegistryBackend: CarBackend + ManufacturerBackend + DriverBackend {}

/// Automatic implementation for any type that implements all three traits
impl<T> RegistryBackend for T where T: CarBackend + ManufacturerBackend + DriverBackend {}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend based on configuration
    pub async fn create(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn RegistryBackend>> {
        let backend = Self::create_backend(config).await?;
        Ok(Arc::from(backend))
    }

    /// Create a backend based on configuration (returns Box)
    pub async fn create_backend(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Box<dyn RegistryBackend>> {
        match config.database_type {
            DatabaseType::PostgreSQL => {
                let backend =
                    crate::backend::database::postgres::PostgresBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
            DatabaseType::SQLite => {
                let backend =
                    crate::backend::database::sqlite::SqliteBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
        }
    }
}
