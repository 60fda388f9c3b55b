//! User-authored rule management

pub mod store;

pub use store::*;
