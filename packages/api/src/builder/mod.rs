//! Dial builder modules
//!
//! Provides the fluent API for configuring and starting hostname connect
//! operations.

pub mod core;
pub mod methods;
pub mod options;


pub use self::core::*;
