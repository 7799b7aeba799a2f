use crate::error::{AppError, AppResult, Operation, Stage};
use sqlx::SqlitePool;

const TABLES: [(&str, &str); 4] = [
    (
        "manufacturers",
        r#"
        CREATE TABLE IF NOT EXISTS manufacturers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            country TEXT NOT NULL
        )
        "#,
    ),
    (
        "drivers",
        r#"
        CREATE TABLE IF NOT EXISTS drivers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            licence_number TEXT NOT NULL
        )
        "#,
    ),
    (
        "cars",
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            model TEXT NOT NULL,
            manufacturer_id INTEGER NOT NULL,
            is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
            FOREIGN KEY (manufacturer_id) REFERENCES manufacturers (id)
        )
        "#,
    ),
    (
        "car_drivers",
        r#"
        CREATE TABLE IF NOT EXISTS car_drivers (
            car_id INTEGER NOT NULL,
            driver_id INTEGER NOT NULL,
            FOREIGN KEY (car_id) REFERENCES cars (id),
            FOREIGN KEY (driver_id) REFERENCES drivers (id)
        )
        "#,
    ),
];

const INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_car_drivers_car_id ON car_drivers (car_id)",
    "CREATE INDEX IF NOT EXISTS idx_car_drivers_driver_id ON car_drivers (driver_id)",
];

/// Initialize the database schema for SQLite
///
/// Tables are created in dependency order so the foreign keys resolve.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    for (table, sql) in TABLES {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(AppError::at(Operation::InitSchema, Stage::Schema, table))?;
    }

    for sql in INDEXES {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(AppError::at(Operation::InitSchema, Stage::Schema, "car_drivers"))?;
    }

    tracing::info!("SQLite schema initialized");
    Ok(())
}

/// Drop all tables in reverse dependency order
#[cfg(test)]
pub async fn drop_schema(pool: &SqlitePool) -> AppResult<()> {
    for (table, _) in TABLES.iter().rev() {
        let sql = format!("DROP TABLE IF EXISTS {}", table);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(AppError::at(Operation::InitSchema, Stage::Schema, table))?;
    }

    Ok(())
}
