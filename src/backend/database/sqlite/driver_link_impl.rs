use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{AppError, AppResult, Operation, Stage};

/// Insert one association row per driver for the car
///
/// Statements run one by one on the given connection, which is expected
/// to be inside the caller's transaction.
pub(super) async fn link_drivers(
    conn: &mut SqliteConnection,
    operation: Operation,
    car_id: i64,
    driver_ids: &[i64],
) -> AppResult<()> {
    debug!(car_id, count = driver_ids.len(), "linking drivers");

    for driver_id in driver_ids {
        sqlx::query("INSERT INTO car_drivers (driver_id, car_id) VALUES (?1, ?2)")
            .bind(driver_id)
            .bind(car_id)
            .execute(&mut *conn)
            .await
            .map_err(AppError::at(
                operation,
                Stage::LinkDrivers,
                format!("car {} / driver {}", car_id, driver_id),
            ))?;
    }

    Ok(())
}

/// Delete every association row of the car, returning how many were removed
pub(super) async fn unlink_drivers(
    conn: &mut SqliteConnection,
    operation: Operation,
    car_id: i64,
) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM car_drivers WHERE car_id = ?1")
        .bind(car_id)
        .execute(&mut *conn)
        .await
        .map_err(AppError::at(operation, Stage::UnlinkDrivers, format!("car {}", car_id)))?;

    debug!(car_id, removed = result.rows_affected(), "unlinked drivers");
    Ok(result.rows_affected())
}
