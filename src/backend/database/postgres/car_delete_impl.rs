use async_trait::async_trait;
use sqlx::PgPool;

use super::super::car_delete::CarDeleter;
use crate::error::{AppError, AppResult, Operation, Stage};

/// PostgreSQL-specific implementation of CarDeleter
pub struct PostgresCarDeleter {
    pool: PgPool,
}

impl PostgresCarDeleter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarDeleter for PostgresCarDeleter {
    async fn execute_car_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE cars SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::at(Operation::DeleteCar, Stage::Write, format!("car {}", id)))?;

        Ok(result.rows_affected() > 0)
    }
}
