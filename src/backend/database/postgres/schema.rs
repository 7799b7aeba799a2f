use crate::error::{AppError, AppResult, Operation, Stage};
use sqlx::PgPool;

/// Initialize the database schema for PostgreSQL
///
/// Uses BIGSERIAL/BIGINT keys so ids decode as `i64` like on SQLite.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let statements = [
        (
            "manufacturers",
            r#"
            CREATE TABLE IF NOT EXISTS manufacturers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                country TEXT NOT NULL
            )
            "#,
        ),
        (
            "drivers",
            r#"
            CREATE TABLE IF NOT EXISTS drivers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                licence_number TEXT NOT NULL
            )
            "#,
        ),
        (
            "cars",
            r#"
            CREATE TABLE IF NOT EXISTS cars (
                id BIGSERIAL PRIMARY KEY,
                model TEXT NOT NULL,
                manufacturer_id BIGINT NOT NULL REFERENCES manufacturers (id),
                is_deleted BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        ),
        (
            "car_drivers",
            r#"
            CREATE TABLE IF NOT EXISTS car_drivers (
                car_id BIGINT NOT NULL REFERENCES cars (id),
                driver_id BIGINT NOT NULL REFERENCES drivers (id)
            )
            "#,
        ),
        (
            "car_drivers",
            "CREATE INDEX IF NOT EXISTS idx_car_drivers_car_id ON car_drivers (car_id)",
        ),
        (
            "car_drivers",
            "CREATE INDEX IF NOT EXISTS idx_car_drivers_driver_id ON car_drivers (driver_id)",
        ),
    ];

    for (table, sql) in statements {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(AppError::at(Operation::InitSchema, Stage::Schema, table))?;
    }

    tracing::info!("PostgreSQL schema initialized");
    Ok(())
}
