//! Database implementations

pub mod location_record_repository;
pub mod manager;

pub use location_record_repository::SqliteLocationRecordRepository;
pub use manager::DbManager;
