pub mod migration_service;
pub mod store_service;

pub use migration_service::*;
pub use store_service::*;
