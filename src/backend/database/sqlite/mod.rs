//! SQLite implementations of the car registry storage adapters

mod backend_impl;
mod car_delete_impl;
mod car_insert_impl;
mod car_read_impl;
mod car_update_impl;
mod driver_impl;
mod driver_link_impl;
mod manufacturer_impl;
pub mod schema;

pub use backend_impl::SqliteBackend;
pub use car_delete_impl::SqliteCarDeleter;
pub use car_insert_impl::SqliteCarInserter;
pub use car_read_impl::SqliteCarReader;
pub use car_update_impl::SqliteCarUpdater;
pub use driver_impl::SqliteDriverStore;
pub use manufacturer_impl::SqliteManufacturerStore;
