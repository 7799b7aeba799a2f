use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{
    PostgresCarDeleter, PostgresCarInserter, PostgresCarReader, PostgresCarUpdater,
    PostgresDriverStore, PostgresManufacturerStore,
};
use crate::backend::database::{
    UnifiedCarDeleteOps, UnifiedCarInsertOps, UnifiedCarReadOps, UnifiedCarUpdateOps,
};
use crate::backend::{Backend, CarBackend, DriverBackend, ManufacturerBackend};
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::{Car, Driver, Manufacturer};

/// PostgreSQL database backend implementation
pub struct PostgresBackend {
    pool: PgPool,
    car_insert_ops: UnifiedCarInsertOps<PostgresCarInserter>,
    car_update_ops: UnifiedCarUpdateOps<PostgresCarUpdater>,
    car_delete_ops: UnifiedCarDeleteOps<PostgresCarDeleter>,
    car_read_ops: UnifiedCarReadOps<PostgresCarReader>,
    manufacturers: PostgresManufacturerStore,
    drivers: PostgresDriverStore,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend instance
    pub fn new(pool: PgPool) -> Self {
        // Create database-specific adapters
        let car_inserter = PostgresCarInserter::new(pool.clone());
        let car_updater = PostgresCarUpdater::new(pool.clone());
        let car_deleter = PostgresCarDeleter::new(pool.clone());
        let car_reader = PostgresCarReader::new(pool.clone());

        Self {
            car_insert_ops: UnifiedCarInsertOps::new(car_inserter),
            car_update_ops: UnifiedCarUpdateOps::new(car_updater),
            car_delete_ops: UnifiedCarDeleteOps::new(car_deleter),
            car_read_ops: UnifiedCarReadOps::new(car_reader),
            manufacturers: PostgresManufacturerStore::new(pool.clone()),
            drivers: PostgresDriverStore::new(pool.clone()),
            pool,
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        // Validate configuration
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        // Create connection pool
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(AppError::at(Operation::Connect, Stage::Connect, "PostgreSQL"))?;

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::at(Operation::HealthCheck, Stage::Read, "PostgreSQL"))?;

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
impl CarBackend for PostgresBackend {
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
impl ManufacturerBackend for PostgresBackend {
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
impl DriverBackend for PostgresBackend {
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
