//! Configuration management for the monitor

pub mod settings;

pub use settings::*;
