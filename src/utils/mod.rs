//! Utility modules and helper functions

pub mod file_utils;
pub mod input;
pub mod logging;
pub mod validation;
