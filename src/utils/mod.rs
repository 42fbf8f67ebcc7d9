//! Utility functions
//!
//! Provides logging setup and the injected component logger.

pub mod logging;

pub use logging::ComponentLogger;
