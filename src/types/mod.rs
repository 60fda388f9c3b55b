//! Core data types and structures

pub mod market;
pub mod orders;
pub mod strategy;
pub mod rules;
pub mod criteria;

pub use market::*;
pub use orders::*;
pub use strategy::*;
pub use rules::*;
pub use criteria::*;
