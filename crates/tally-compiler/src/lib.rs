//! Tally syntax checker
//!
//! Loads a Tally source file, runs the syntax analyser over it and collects
//! the parse trace and diagnostics.

pub mod driver;
pub mod error;

pub use driver::{Checker, CheckOptions, CheckOutput};
pub use error::{CheckError, Result};
