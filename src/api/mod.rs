//! Conceptual backend API client

pub mod client;
pub mod retry;

pub use client::*;
pub use retry::*;
