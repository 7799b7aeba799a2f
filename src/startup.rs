use std::sync::Arc;

use crate::backend::{BackendFactory, RegistryBackend};
use crate::config::AppConfig;
use crate::error::AppResult;

/// Connect the configured backend and make sure the schema exists
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn RegistryBackend>> {
    let backend_config = config.backend_config()?;

    tracing::info!(
        db_type = %config.database.db_type,
        url = %config.database.url,
        "setting up backend"
    );

    let backend = BackendFactory::create(&backend_config).await?;
    backend.health_check().await?;
    backend.init_schema().await?;

    Ok(backend)
}
