use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::super::car_insert::{CarInserter, PreparedCarData};
use super::driver_link_impl::link_drivers;
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Car;

/// PostgreSQL-specific implementation of CarInserter
///
/// The generated id comes back through `RETURNING`; the car row and its
/// driver associations share one transaction.
pub struct PostgresCarInserter {
    pool: PgPool,
}

impl PostgresCarInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarInserter for PostgresCarInserter {
    async fn execute_car_insert(&self, data: PreparedCarData) -> AppResult<Car> {
        let operation = Operation::CreateCar;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::at(operation, Stage::Begin, &data.car))?;

        let car_id: i64 = sqlx::query_scalar(
            "INSERT INTO cars (model, manufacturer_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&data.model)
        .bind(data.manufacturer_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::at(operation, Stage::CarRow, &data.car))?;
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
