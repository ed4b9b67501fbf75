//! Text rendering layer for the bikeshare explorer.
//!
//! Turns statistics results and pages of raw trips into plain-text output on
//! any [`std::io::Write`], and clears the terminal between views.

pub mod report;
pub mod table_view;
pub mod terminal;

pub use bikeshare_core as core;
