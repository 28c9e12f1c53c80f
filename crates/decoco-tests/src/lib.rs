//! decoco testing suite
//!
//! Cross-crate integration tests and criterion benchmarks for the decoco
//! workspace, plus the data generators and tracing setup they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Data generators and logging setup used by the integration tests and the
/// benchmarks.
pub mod test_utils;

pub use test_utils::{
    generate_test_data, init_tracing, init_tracing_from_config, CommonSizes, TestDataPattern,
};
