//! Utility modules for requisitor.
//!
//! - [`date`] - Date parsing, arithmetic and token-pattern formatting
//! - [`currency`] - Brazilian real formatting for service values
//!
//! Everything here is a pure function that degrades to a sentinel value on
//! bad input instead of returning an error.

pub mod currency;
pub mod date;
