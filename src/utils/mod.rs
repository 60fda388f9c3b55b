//! Logging, display and formatting utilities

pub mod display;
pub mod format;
pub mod logging;

pub use display::*;
pub use format::*;
pub use logging::*;
