//! Shared building blocks for the bikeshare explorer.
//!
//! Holds the dataset registry, the trip data model, answer validation for
//! interactive prompts, output formatting helpers, timestamp parsing, CLI
//! settings and the error type used by every other crate.

pub mod error;
pub mod formatting;
pub mod models;
pub mod options;
pub mod registry;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
