//! Utility Module
//!
//! - [`Timer`]: frame timing for hosts that drive their own loop

pub mod time;

pub use time::Timer;
