//! Core business logic module
//!
//! Domain models, configuration, the extractor and opener seams, and the
//! job driver that ties them together.

pub mod config;
pub mod extractor;
pub mod job;
pub mod models;
pub mod opener;

#[cfg(test)]
mod fakes;


#[cfg(test)]
mod job_integration_tests;


// Re-export commonly used types
pub use config::AppConfig;
pub use job::run_job;
