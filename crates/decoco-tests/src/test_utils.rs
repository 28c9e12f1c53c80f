//! Unified test utilities for decoco benchmarks and tests

use decoco_config::LoggingConfig;
use decoco_types::{Error, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Test data generation patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestDataPattern {
    /// All zeros - highly compressible
    Zeros,
    /// Repeated English text
    Text,
    /// Pseudo-random bytes - incompressible
    Random,
    /// Runs of zeros interleaved with pseudo-random stretches
    Mixed,
}

impl TestDataPattern {
    /// Every pattern, for parameterized loops
    pub const ALL: [Self; 4] = [Self::Zeros, Self::Text, Self::Random, Self::Mixed];

    /// Short label for benchmark ids
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zeros => "zeros",
            Self::Text => "text",
            Self::Random => "random",
            Self::Mixed => "mixed",
        }
    }
}

/// Generate test data with the given pattern
///
/// Output is deterministic so benchmark runs stay comparable.
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Text => b"The quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(size)
            .collect(),
        TestDataPattern::Random => {
            let mut state = 0x2545_f491_4f6c_dd1d_u64;
            (0..size).map(|_| next_byte(&mut state)).collect()
        }
        TestDataPattern::Mixed => {
            let mut state = 0x9e37_79b9_7f4a_7c15_u64;
            (0..size)
                .map(|i| {
                    if i % 1000 < 300 {
                        0
                    } else {
                        next_byte(&mut state)
                    }
                })
                .collect()
        }
    }
}

// xorshift64
fn next_byte(state: &mut u64) -> u8 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    (*state >> 24) as u8
}

/// Common payload sizes for benchmarks
pub struct CommonSizes;

impl CommonSizes {
    /// 1KB
    pub const TINY: usize = 1024;
    /// 64KB
    pub const MEDIUM: usize = 64 * 1024;
    /// 1MB
    pub const LARGE: usize = 1024 * 1024;

    /// Sizes used by the codec benchmarks
    pub fn all() -> Vec<(&'static str, usize)> {
        vec![
            ("1KB", Self::TINY),
            ("64KB", Self::MEDIUM),
            ("1MB", Self::LARGE),
        ]
    }
}

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `warn`)
///
/// Safe to call from many tests; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Install a global fmt subscriber from a loaded [`LoggingConfig`]
///
/// The configured level must parse even when `RUST_LOG` is set, though
/// `RUST_LOG` wins when it does.
pub fn init_tracing_from_config(config: &LoggingConfig) -> Result<()> {
    let configured = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {e}", config.level)))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored_output)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install subscriber: {e}")))
}
