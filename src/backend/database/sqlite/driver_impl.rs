use sqlx::SqlitePool;

use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Driver;

/// SQLite storage for the drivers table
pub struct SqliteDriverStore {
    pool: SqlitePool,
}

impl SqliteDriverStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let result = sqlx::query("INSERT INTO drivers (name, licence_number) VALUES (?1, ?2)")
            .bind(&driver.name)
            .bind(&driver.licence_number)
            .execute(&self.pool)
            .await
            .map_err(AppError::at(Operation::CreateDriver, Stage::Write, &driver.name))?;

        Ok(Driver {
            id: Some(result.last_insert_rowid()),
            ..driver.clone()
        })
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, licence_number FROM drivers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::at(
                    Operation::GetDriver,
                    Stage::Read,
                    format!("driver {}", id),
                ))?;

        Ok(row.map(|(id, name, licence)| Driver::with_id(id, name, licence)))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Driver>> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, licence_number FROM drivers ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::at(Operation::GetAllDrivers, Stage::Read, "all drivers"))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, licence)| Driver::with_id(id, name, licence))
            .collect())
    }
}
