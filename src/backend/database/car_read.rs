//! Car read operations
//!
//! This module provides common interfaces for car read operations
//! that work across different database backends.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Car;

/// Trait for car read operations
#[async_trait]
pub trait CarReader: Send + Sync {
    /// Find a live car by ID
    async fn find_car_by_id(&self, id: i64) -> AppResult<Option<Car>>;

    /// Find all live cars
    async fn find_all_cars(&self) -> AppResult<Vec<Car>>;

    /// Find live cars associated with a driver
    async fn find_cars_by_driver(&self, driver_id: i64) -> AppResult<Vec<Car>>;
}

/// Unified car read operations
///
/// Ids below 1 never match a row and short-circuit to an empty result.
pub struct UnifiedCarReadOps<T: CarReader> {
    reader: T,
}

impl<T: CarReader> UnifiedCarReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_car_by_id(&self, id: i64) -> AppResult<Option<Car>> {
        if id < 1 {
            return Ok(None);
        }
        self.reader.find_car_by_id(id).await
    }

    pub async fn find_all_cars(&self) -> AppResult<Vec<Car>> {
        self.reader.find_all_cars().await
    }

    pub async fn find_cars_by_driver(&self, driver_id: i64) -> AppResult<Vec<Car>> {
        if driver_id < 1 {
            return Ok(Vec::new());
        }
        self.reader.find_cars_by_driver(driver_id).await
    }
}
