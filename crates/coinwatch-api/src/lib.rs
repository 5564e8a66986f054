//! HTTP surface for the coinwatch ticker range-query service.

pub mod config;
pub mod error;
pub mod server;
