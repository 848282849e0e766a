//! Repository implementations

pub mod catalog_repository;
pub mod memory_catalog_repository;

pub use catalog_repository::{SeaOrmCatalogStore, SeaOrmCatalogTx};
pub use memory_catalog_repository::{CatalogTables, InMemoryCatalogStore, InMemoryCatalogTx};
