//! Sector credit dashboard engine.
//!
//! Parses a semicolon-delimited export of per-sector amounts, pivots it into a
//! per-day wide table and derives period statistics. The `ecodash` binary is a
//! thin CLI over this library.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod transfer;
pub mod utils;
