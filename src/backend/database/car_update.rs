use async_trait::async_trait;

use super::car_insert::CarInsertProcessor;
use crate::error::{AppError, AppResult};
use crate::models::Car;

/// Prepared car data for database update
#[derive(Debug)]
pub struct PreparedCarUpdateData {
    pub car: Car,
    pub id: i64,
    pub model: String,
    pub manufacturer_id: i64,
    pub driver_ids: Vec<i64>,
}

/// Database-specific adapter for car UPDATE operations
#[async_trait]
pub trait CarUpdater: Send + Sync {
    /// Update the live car row and replace its driver associations.
    /// Returns `None` when no live car matched.
    async fn execute_car_update(&self, data: PreparedCarUpdateData) -> AppResult<Option<Car>>;
}

/// Shared business logic for car UPDATE operations
pub struct CarUpdateProcessor;

impl CarUpdateProcessor {
    /// Validate car ID for update
    pub fn validate_car_id(id: Option<i64>) -> AppResult<i64> {
        match id {
            Some(id) if id > 0 => Ok(id),
            Some(id) => Err(AppError::BadRequest(format!("Invalid car id {}", id))),
            None => Err(AppError::BadRequest(
                "Car id is required for update".to_string(),
            )),
        }
    }

    /// Prepare car data for database update
    pub fn prepare_car_for_update(car: &Car) -> AppResult<PreparedCarUpdateData> {
        let id = Self::validate_car_id(car.id)?;
        let manufacturer_id = CarInsertProcessor::manufacturer_id(car)?;
        let driver_ids = CarInsertProcessor::driver_ids(car)?;

        Ok(PreparedCarUpdateData {
            car: car.clone(),
            id,
            model: car.model.clone(),
            manufacturer_id,
            driver_ids,
        })
    }
}

/// Unified car UPDATE operations using the adapter pattern
pub struct UnifiedCarUpdateOps<T: CarUpdater> {
    updater: T,
}

impl<T: CarUpdater> UnifiedCarUpdateOps<T> {
    pub fn new(updater: T) -> Self {
        Self { updater }
    }

    /// Update a car using shared logic and database-specific execution
    pub async fn update_car(&self, car: &Car) -> AppResult<Option<Car>> {
        let prepared_data = CarUpdateProcessor::prepare_car_for_update(car)?;

        self.updater.execute_car_update(prepared_data).await
    }
}
