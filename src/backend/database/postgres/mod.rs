//! PostgreSQL implementations of the car registry storage adapters

mod backend_impl;
mod car_delete_impl;
mod car_insert_impl;
mod car_read_impl;
mod car_update_impl;
mod driver_impl;
mod driver_link_impl;
mod manufacturer_impl;
pub mod schema;

pub use backend_impl::PostgresBackend;
pub use car_delete_impl::PostgresCarDeleter;
pub use car_insert_impl::PostgresCarInserter;
pub use car_read_impl::PostgresCarReader;
pub use car_update_impl::PostgresCarUpdater;
pub use driver_impl::PostgresDriverStore;
pub use manufacturer_impl::PostgresManufacturerStore;
