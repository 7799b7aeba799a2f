use async_trait::async_trait;
use sqlx::PgPool;

use super::super::car_read::CarReader;
use super::super::car_rows::{fold_car_rows, select_cars_sql, CarDriverRow};
use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Car;

/// PostgreSQL-specific implementation of CarReader
pub struct PostgresCarReader {
    pool: PgPool,
}

impl PostgresCarReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarReader for PostgresCarReader {
    async fn find_car_by_id(&self, id: i64) -> AppResult<Option<Car>> {
        let sql = select_cars_sql(Some("c.id = $1"));

        let rows = sqlx::query_as::<_, CarDriverRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::at(Operation::GetCar, Stage::Read, format!("car {}", id)))?;

        Ok(fold_car_rows(rows).into_iter().next())
    }

    async fn find_all_cars(&self) -> AppResult<Vec<Car>> {
        let sql = select_cars_sql(None);

        let rows = sqlx::query_as::<_, CarDriverRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::at(Operation::GetAllCars, Stage::Read, "all cars"))?;

        Ok(fold_car_rows(rows))
    }

    async fn find_cars_by_driver(&self, driver_id: i64) -> AppResult<Vec<Car>> {
        // Filter on car id so each car still carries its full driver list
        let sql = select_cars_sql(Some(
            "c.id IN (SELECT car_id FROM car_drivers WHERE driver_id = $1)",
        ));

        let rows = sqlx::query_as::<_, CarDriverRow>(&sql)
            .bind(driver_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::at(
                Operation::GetCarsByDriver,
                Stage::Read,
                format!("driver {}", driver_id),
            ))?;

        Ok(fold_car_rows(rows))
    }
}
