//! Scanner and token model for the Tally language.
//!
//! The scanner hands out one [`Token`] at a time and reports the end of the
//! source as an ordinary token with [`Symbol::EndOfInput`], so consumers never
//! special-case stream exhaustion.

mod error;
mod scanner;
mod token;

pub use error::ScanError;
pub use scanner::{tokenize, Scanner};
pub use token::{Symbol, Token};
