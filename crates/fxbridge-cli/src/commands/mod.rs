//! CLI command implementations.

pub mod options;
pub mod process;
