use sqlx::SqlitePool;

use crate::error::{AppError, AppResult, Operation, Stage};
use crate::models::Manufacturer;

/// SQLite storage for the manufacturers table
pub struct SqliteManufacturerStore {
    pool: SqlitePool,
}

impl SqliteManufacturerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, manufacturer: &Manufacturer) -> AppResult<Manufacturer> {
        let result = sqlx::query("INSERT INTO manufacturers (name, country) VALUES (?1, ?2)")
            .bind(&manufacturer.name)
            .bind(&manufacturer.country)
            .execute(&self.pool)
            .await
            .map_err(AppError::at(
                Operation::CreateManufacturer,
                Stage::Write,
                &manufacturer.name,
            ))?;

        Ok(Manufacturer {
            id: Some(result.last_insert_rowid()),
            ..manufacturer.clone()
        })
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Manufacturer>> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, country FROM manufacturers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::at(
                    Operation::GetManufacturer,
                    Stage::Read,
                    format!("manufacturer {}", id),
                ))?;

        Ok(row.map(|(id, name, country)| Manufacturer::with_id(id, name, country)))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Manufacturer>> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, name, country FROM manufacturers ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::at(
                    Operation::GetAllManufacturers,
                    Stage::Read,
                    "all manufacturers",
                ))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, country)| Manufacturer::with_id(id, name, country))
            .collect())
    }
}
