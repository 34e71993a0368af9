//! Command handlers
//!
//! One module per top-level command of the binary.

pub mod config;
pub mod grab;
pub mod system;
