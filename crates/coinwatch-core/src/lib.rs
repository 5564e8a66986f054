//! Core contracts for coinwatch.
//!
//! This crate contains:
//! - Domain types and validation (`Symbol`, `Timestamp`, `Ticker`)
//! - The range-validating ticker query service
//! - The store seam and its DuckDB adapter

pub mod domain;
pub mod error;
pub mod service;
pub mod store;

pub use coinwatch_store::{StoreConfig, StoreError, TickerRecord, TickerRepository};
pub use domain::{Symbol, Ticker, Timestamp};
pub use error::{ServiceError, ValidationError};
pub use service::{TickerService, TickerStore, MAX_QUERY_DAYS};
pub use store::DuckDbTickerStore;
