use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{
    SqliteCarDeleter, SqliteCarInserter, SqliteCarReader, SqliteCarUpdater, SqliteDriverStore,
    SqliteManufacturerStore,
};
use crate::backend::database::{
    UnifiedCarDeleteOps, UnifiedCarInsertOps, UnifiedCarReadOps, UnifiedCarUpdateOps,
};
use crate::backend::{Backend, CarBackend, DriverBackend, ManufacturerBackend};
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::{Car, Driver, Manufacturer};

/// SQLite database backend implementation
pub struct SqliteBackend {
    pool: SqlitePool,
    car_insert_ops: UnifiedCarInsertOps<SqliteCarInserter>,
    car_update_ops: UnifiedCarUpdateOps<SqliteCarUpdater>,
    car_delete_ops: UnifiedCarDeleteOps<SqliteCarDeleter>,
    car_read_ops: UnifiedCarReadOps<SqliteCarReader>,
    manufacturers: SqliteManufacturerStore,
    drivers: SqliteDriverStore,
}

impl SqliteBackend {
    /// Create a new SQLite backend instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            car_insert_ops: UnifiedCarInsertOps::new(SqliteCarInserter::new(pool.clone())),
            car_update_ops: UnifiedCarUpdateOps::new(SqliteCarUpdater::new(pool.clone())),
            car_delete_ops: UnifiedCarDeleteOps::new(SqliteCarDeleter::new(pool.clone())),
            car_read_ops: UnifiedCarReadOps::new(SqliteCarReader::new(pool.clone())),
            manufacturers: SqliteManufacturerStore::new(pool.clone()),
            drivers: SqliteDriverStore::new(pool.clone()),
            pool,
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let mut options = SqlitePoolOptions::new()
            .max_connections(config.effective_max_connections())
            .acquire_timeout(Duration::from_secs(config.connection_timeout));
        if config.is_memory_database() {
            // Closing the only connection would discard the whole store
            options = options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        // A missing database file is created on first use
        let connect_options = SqliteConnectOptions::from_str(&config.sqlx_url())
            .map_err(AppError::at(
                Operation::Connect,
                Stage::Connect,
                &config.connection_url,
            ))?
            .create_if_missing(true);

        let pool = options
            .connect_with(connect_options)
            .await
            .map_err(AppError::at(
                Operation::Connect,
                Stage::Connect,
                &config.connection_url,
            ))?;

        tracing::debug!(url = %config.connection_url, "connected to SQLite");
        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::at(Operation::HealthCheck, Stage::Read, "SQLite"))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl CarBackend for SqliteBackend {
    async fn create_car(&self, car: &Car) -> AppResult<Car> {
        self.car_insert_ops.create_car(car).await
    }

    async fn find_car_by_id(&self, id: i64) -> AppResult<Option<Car>> {
        self.car_read_ops.find_car_by_id(id).await
    }

    async fn find_all_cars(&self) -> AppResult<Vec<Car>> {
        self.car_read_ops.find_all_cars().await
    }

    async fn find_cars_by_driver(&self, driver_id: i64) -> AppResult<Vec<Car>> {
        self.car_read_ops.find_cars_by_driver(driver_id).await
    }

    async fn update_car(&self, car: &Car) -> AppResult<Option<Car>> {
        self.car_update_ops.update_car(car).await
    }

    async fn delete_car(&self, id: i64) -> AppResult<bool> {
        self.car_delete_ops.delete_car(id).await
    }
}

#[async_trait]
impl ManufacturerBackend for SqliteBackend {
    async fn create_manufacturer(&self, manufacturer: &Manufacturer) -> AppResult<Manufacturer> {
        self.manufacturers.create(manufacturer).await
    }

    async fn find_manufacturer_by_id(&self, id: i64) -> AppResult<Option<Manufacturer>> {
        self.manufacturers.find_by_id(id).await
    }

    async fn find_all_manufacturers(&self) -> AppResult<Vec<Manufacturer>> {
        self.manufacturers.find_all().await
    }
}

#[async_trait]
impl DriverBackend for SqliteBackend {
    async fn create_driver(&self, driver: &Driver) -> AppResult<Driver> {
        self.drivers.create(driver).await
    }

    async fn find_driver_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        self.drivers.find_by_id(id).await
    }

    async fn find_all_drivers(&self) -> AppResult<Vec<Driver>> {
        self.drivers.find_all().await
    }
}
