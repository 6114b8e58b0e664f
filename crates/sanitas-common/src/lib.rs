//! Common utilities for the sanitas sanitizer.
//!
//! This crate provides shared infrastructure used by all sanitizer components:
//! - **Warning System** - colored, deduplicated diagnostics on stderr
//! - **Names** - validity checks for element and attribute names
//! - **URLs** - the parts of URL parsing a sanitizer has to agree on with browsers

pub mod names;
pub mod url;
pub mod warning;
