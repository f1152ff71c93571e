//! tabprep: tabular feature preprocessing
//!
//! Fits a column transformer on a training split (median imputation and
//! standard scaling for numeric columns, most-frequent imputation and one-hot
//! encoding for categorical columns), applies it to train and test, and
//! persists the fitted transformer for reuse.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
