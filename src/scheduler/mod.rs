//! Periodic task scheduling

pub mod poller;

pub use poller::*;
