//! Application context wiring

pub mod context;

pub use context::*;
