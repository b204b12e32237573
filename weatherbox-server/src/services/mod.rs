mod ingestion_service;
pub mod normalizer;
mod unit_store;

pub use ingestion_service::*;
pub use unit_store::*;
