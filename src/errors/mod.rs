//! Error handling for validation, storage and network failures

pub mod monitor_error;

pub use monitor_error::*;
