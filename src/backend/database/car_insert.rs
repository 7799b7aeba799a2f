use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::Car;

/// Prepared car data for database insertion
#[derive(Debug)]
pub struct PreparedCarData {
    pub car: Car,
    pub model: String,
    pub manufacturer_id: i64,
    pub driver_ids: Vec<i64>,
}

/// Database-specific adapter for car INSERT operations
#[async_trait]
pub trait CarInserter: Send + Sync {
    /// Insert the car row and its driver associations, returning the
    /// car with the store-generated id assigned
    async fn execute_car_insert(&self, data: PreparedCarData) -> AppResult<Car>;
}

/// Shared business logic for car INSERT operations
pub struct CarInsertProcessor;

impl CarInsertProcessor {
    /// Prepare car data for database insertion
    ///
    /// Any id already on the car is discarded; the store assigns one.
    pub fn prepare_car_for_insert(car: &Car) -> AppResult<PreparedCarData> {
        let mut car = car.clone();
        car.id = None;

        let manufacturer_id = Self::manufacturer_id(&car)?;
        let driver_ids = Self::driver_ids(&car)?;

        Ok(PreparedCarData {
            model: car.model.clone(),
            manufacturer_id,
            driver_ids,
            car,
        })
    }

    /// The manufacturer must already be persisted
    pub fn manufacturer_id(car: &Car) -> AppResult<i64> {
        car.manufacturer.id.ok_or_else(|| {
            AppError::BadRequest(format!(
                "Manufacturer '{}' of {} has no id",
                car.manufacturer.name, car
            ))
        })
    }

    /// Every driver must already be persisted to be associated
    pub fn driver_ids(car: &Car) -> AppResult<Vec<i64>> {
        car.drivers
            .iter()
            .map(|driver| {
                driver.id.ok_or_else(|| {
                    AppError::BadRequest(format!("Driver '{}' of {} has no id", driver.name, car))
                })
            })
            .collect()
    }
}

/// Unified car INSERT operations using the adapter pattern
pub struct UnifiedCarInsertOps<T: CarInserter> {
    inserter: T,
}

impl<T: CarInserter> UnifiedCarInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    /// Create a new car using shared logic and database-specific execution
    pub async fn create_car(&self, car: &Car) -> AppResult<Car> {
        let prepared_data = CarInsertProcessor::prepare_car_for_insert(car)?;

        self.inserter.execute_car_insert(prepared_data).await
    }
}
