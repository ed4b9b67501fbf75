//! Data layer for the bikeshare explorer.
//!
//! Reads the per-city CSV sources, narrows the trips by month and weekday,
//! computes the descriptive statistics and runs the top-level load pipeline.

pub mod analysis;
pub mod filter;
pub mod reader;
pub mod statistics;

#[cfg(test)]
mod test_support;

pub use bikeshare_core as core;
