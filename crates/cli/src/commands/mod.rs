//! CLI command implementations.
//!
//! Each command writes its report to the given writer so it can be checked
//! in tests.

pub mod lookup;
pub mod quote;
pub mod validate;
