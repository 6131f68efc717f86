pub mod connector;
pub mod error;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod ports;
pub mod repositories;
pub mod schema;
pub mod storage_estimate;
mod executor;

pub use executor::DieselSqliteExecutor;
