//! Interactive runtime for the bikeshare explorer.
//!
//! Drives the prompt dialogue: filter acquisition, loading, the statistics
//! menu, raw-data paging and the restart loop.

pub mod paginator;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
