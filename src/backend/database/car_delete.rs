use async_trait::async_trait;

use crate::error::AppResult;

/// Database-specific adapter for car DELETE operations
#[async_trait]
pub trait CarDeleter: Send + Sync {
    /// Flag the car as deleted. Returns whether a row was affected.
    async fn execute_car_delete(&self, id: i64) -> AppResult<bool>;
}

/// Shared business logic for car DELETE operations
pub struct CarDeleteProcessor;

impl CarDeleteProcessor {
    /// Store ids start at 1; anything else cannot match a row
    pub fn is_valid_car_id(id: i64) -> bool {
        id > 0
    }
}

/// Unified car DELETE operations using the adapter pattern
pub struct UnifiedCarDeleteOps<T: CarDeleter> {
    deleter: T,
}

impl<T: CarDeleter> UnifiedCarDeleteOps<T> {
    pub fn new(deleter: T) -> Self {
        Self { deleter }
    }

    /// Soft delete a car. Its driver associations are left untouched.
    pub async fn delete_car(&self, id: i64) -> AppResult<bool> {
        if !CarDeleteProcessor::is_valid_car_id(id) {
            return Ok(false);
        }

        self.deleter.execute_car_delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDeleter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CarDeleter for CountingDeleter {
        async fn execute_car_delete(&self, _id: i64) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[test]
    fn test_is_valid_car_id() {
        assert!(CarDeleteProcessor::is_valid_car_id(1));
        assert!(!CarDeleteProcessor::is_valid_car_id(0));
        assert!(!CarDeleteProcessor::is_valid_car_id(-1));
    }

    #[tokio::test]
    async fn test_invalid_id_does_not_reach_the_store() {
        let ops = UnifiedCarDeleteOps::new(CountingDeleter {
            calls: AtomicUsize::new(0),
        });

        assert!(!ops.delete_car(0).await.unwrap());
        assert!(ops.delete_car(4).await.unwrap());
        assert_eq!(ops.deleter.calls.load(Ordering::SeqCst), 1);
    }
}
