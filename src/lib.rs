//! # Draft Stats
//!
//! Descriptive statistics over a log of drafted team matches: hero pick,
//! win and ban rates, per-lane performance, multi-hero synergies, directional
//! counter matchups and tournament-to-tournament meta shifts.
//!
//! ## Architecture
//!
//! - **analysis**: pure aggregation over `MatchRecord`s
//! - **view**: search, lane filter and sort shared by every ranked table
//! - **api**: CSV loading from a URL or a local file
//! - **cache**: local copy of downloaded datasets
//! - **config**: environment configuration

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod view;

pub use analysis::pipeline::{aggregate, AllTables};
pub use analysis::record::{Lane, MatchRecord, LANES};
pub use error::AppError;
