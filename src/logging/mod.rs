//! Structured diagnostic logging.
//!
//! Provides logging macros and a context that puts the forward id and
//! channel in every diagnostic line for easy correlation.

pub mod structured;

pub use structured::*;
