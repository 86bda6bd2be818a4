//! Report data derived from cycle summaries

pub mod spending;

pub use spending::*;
