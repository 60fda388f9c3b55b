//! Opportunity screening: predicate filtering and profit ordering

pub mod engine;

pub use engine::*;
