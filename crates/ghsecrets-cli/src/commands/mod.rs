//! CLI command implementations.

pub mod set;
