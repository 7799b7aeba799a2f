use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::super::car_update::{CarUpdater, PreparedCarUpdateData};
use super::driver_link_impl::{link_drivers, unlink_drivers};
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Car;

/// PostgreSQL-specific implementation of CarUpdater
///
/// Replaces the driver set by deleting every association of the car and
/// inserting the new ones, all inside the transaction of the row update.
pub struct PostgresCarUpdater {
    pool: PgPool,
}

impl PostgresCarUpdater {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarUpdater for PostgresCarUpdater {
    async fn execute_car_update(&self, data: PreparedCarUpdateData) -> AppResult<Option<Car>> {
        let operation = Operation::UpdateCar;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::at(operation, Stage::Begin, &data.car))?;

        let result = sqlx::query(
            "UPDATE cars SET model = $1, manufacturer_id = $2 WHERE id = $3 AND is_deleted = FALSE",
        )
        .bind(&data.model)
        .bind(data.manufacturer_id)
        .bind(data.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::at(operation, Stage::CarRow, &data.car))?;

        if result.rows_affected() == 0 {
            debug!(car_id = data.id, "no live car to update");
            return Ok(None);
        }

        unlink_drivers(&mut tx, operation, data.id).await?;
        link_drivers(&mut tx, operation, data.id, &data.driver_ids).await?;

        tx.commit()
            .await
            .map_err(AppError::at(operation, Stage::Commit, &data.car))?;

        Ok(Some(data.car))
    }
}
