use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::super::car_insert::{CarInserter, PreparedCarData};
use super::driver_link_impl::link_drivers;
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Car;

/// SQLite-specific implementation of CarInserter
///
/// The car row and its driver associations are written in one transaction.
pub struct SqliteCarInserter {
    pool: SqlitePool,
}

impl SqliteCarInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarInserter for SqliteCarInserter {
    async fn execute_car_insert(&self, data: PreparedCarData) -> AppResult<Car> {
        let operation = Operation::CreateCar;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::at(operation, Stage::Begin, &data.car))?;

        let result = sqlx::query("INSERT INTO cars (model, manufacturer_id) VALUES (?1, ?2)")
            .bind(&data.model)
            .bind(data.manufacturer_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::at(operation, Stage::CarRow, &data.car))?;
        let car_id = result.last_insert_rowid();
        debug!(car_id, model = %data.model, "inserted car row");

        link_drivers(&mut tx, operation, car_id, &data.driver_ids).await?;

        tx.commit()
            .await
            .map_err(AppError::at(operation, Stage::Commit, format!("car {}", car_id)))?;

        let mut car = data.car;
        car.id = Some(car_id);
        Ok(car)
    }
}
