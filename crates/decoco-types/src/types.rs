//! Core codec types
//!
//! This module names the codec variants the library supports and carries the
//! small value types shared by every adapter.

use std::fmt;

/// Codec variant
///
/// `Deflate`, `Zlib` and `Gzip` share one entropy-coding engine and differ only
/// in the framing written around the raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CodecKind {
    /// Raw, headerless DEFLATE (RFC 1951)
    Deflate,
    /// DEFLATE with the 2-byte zlib header and Adler-32 trailer (RFC 1950)
    Zlib,
    /// DEFLATE inside the gzip container (RFC 1952)
    Gzip,
    /// bzip2 container
    Bzip2,
    /// LZMA2 inside the `.xz` container
    Lzma,
    /// Raw Brotli stream
    Brotli,
    /// Zstandard frame
    Zstd,
}

impl CodecKind {
    /// Every supported codec, in registry order
    pub const ALL: [Self; 7] = [
        Self::Gzip,
        Self::Lzma,
        Self::Bzip2,
        Self::Zlib,
        Self::Deflate,
        Self::Brotli,
        Self::Zstd,
    ];

    /// Canonical lowercase name used by the registry
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Zlib => "zlib",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Lzma => "lzma",
            Self::Brotli => "brotli",
            Self::Zstd => "zstd",
        }
    }

    /// Look up a codec by its canonical name.
    ///
    /// Matching is exact and case-sensitive: `"GZIP"` is not `"gzip"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|codec| codec.name() == name)
    }

    /// Whether the format carries a magic signature the sniffer can detect.
    ///
    /// Raw DEFLATE and Brotli have no reliable signature.
    pub const fn is_sniffable(self) -> bool {
        !matches!(self, Self::Deflate | Self::Brotli)
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Running byte totals for one adapter instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamStats {
    /// Input bytes consumed by the engine
    pub bytes_in: u64,
    /// Output bytes written into caller windows
    pub bytes_out: u64,
}

impl StreamStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one bounded call
    pub fn record(&mut self, consumed: usize, produced: usize) {
        self.bytes_in += consumed as u64;
        self.bytes_out += produced as u64;
    }

    /// Output size divided by input size (1.0 before any input was consumed)
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            1.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}
