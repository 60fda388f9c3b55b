//! Push-feed consumption: typed events and the reconnecting client

pub mod client;
pub mod events;

pub use client::*;
pub use events::*;
