//! # phrasekit common
//!
//! Shared infrastructure for the phrasekit workspace: structured logging
//! setup and, behind the `testing` feature, helpers used by the test suites
//! of the other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
