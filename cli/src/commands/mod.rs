//! Command implementations for the refiner CLI

pub mod analyze;
pub mod clear;
pub mod config;
pub mod test_key;
