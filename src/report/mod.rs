//! Report module - summarizing transformation results

pub mod statistics;
pub mod summary;

pub use statistics::*;
pub use summary::*;
