//! Name-based lookup and format sniffing
//!
//! The registry is a constant table from canonical codec names to adapter
//! constructors. Lookups are exact and case-sensitive, and an unknown name is
//! an ordinary `None`, not an error.

use crate::compressor::{Compressor, Decompressor};
use decoco_types::{ChunkSize, CodecKind, Level, Result};
use tracing::debug;

/// Builds a compressor for one codec
pub type CompressorCtor = fn(Level, ChunkSize) -> Result<Compressor>;

/// Builds a decompressor for one codec
pub type DecompressorCtor = fn(ChunkSize) -> Result<Decompressor>;

/// One row of the registry
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    /// Canonical lowercase name
    pub name: &'static str,
    /// Codec the constructors build
    pub codec: CodecKind,
    /// Compressor constructor
    pub compressor: CompressorCtor,
    /// Decompressor constructor
    pub decompressor: DecompressorCtor,
}

static REGISTRY: [RegistryEntry; 7] = [
    RegistryEntry {
        name: "gzip",
        codec: CodecKind::Gzip,
        compressor: Compressor::gzip,
        decompressor: Decompressor::gzip,
    },
    RegistryEntry {
        name: "lzma",
        codec: CodecKind::Lzma,
        compressor: Compressor::lzma,
        decompressor: Decompressor::lzma,
    },
    RegistryEntry {
        name: "bzip2",
        codec: CodecKind::Bzip2,
        compressor: Compressor::bzip2,
        decompressor: Decompressor::bzip2,
    },
    RegistryEntry {
        name: "zlib",
        codec: CodecKind::Zlib,
        compressor: Compressor::zlib,
        decompressor: Decompressor::zlib,
    },
    RegistryEntry {
        name: "deflate",
        codec: CodecKind::Deflate,
        compressor: Compressor::deflate,
        decompressor: Decompressor::deflate,
    },
    RegistryEntry {
        name: "brotli",
        codec: CodecKind::Brotli,
        compressor: Compressor::brotli,
        decompressor: Decompressor::brotli,
    },
    RegistryEntry {
        name: "zstd",
        codec: CodecKind::Zstd,
        compressor: Compressor::zstd,
        decompressor: Decompressor::zstd,
    },
];

/// Every registered codec
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}

fn lookup(name: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|entry| entry.name == name)
}

/// Build a compressor by name. Unknown names give `Ok(None)`.
///
/// # Examples
///
/// ```rust
/// use decoco_compression::{find_compressor, ChunkSize, Level};
///
/// assert!(find_compressor("bzip2", Level::Fast, ChunkSize::default())?.is_some());
/// assert!(find_compressor("BZIP2", Level::Fast, ChunkSize::default())?.is_none());
/// # Ok::<(), decoco_compression::Error>(())
/// ```
pub fn find_compressor(
    name: &str,
    level: Level,
    chunk_size: ChunkSize,
) -> Result<Option<Compressor>> {
    match lookup(name) {
        Some(entry) => (entry.compressor)(level, chunk_size).map(Some),
        None => {
            debug!(name, "no compressor registered under this name");
            Ok(None)
        }
    }
}

/// Build a decompressor by name. Unknown names give `Ok(None)`.
pub fn find_decompressor(
    name: &str,
    output_chunk_size: ChunkSize,
) -> Result<Option<Decompressor>> {
    match lookup(name) {
        Some(entry) => (entry.decompressor)(output_chunk_size).map(Some),
        None => {
            debug!(name, "no decompressor registered under this name");
            Ok(None)
        }
    }
}

/// Identify a format from the leading bytes of `bytes`.
///
/// Signatures are checked in a fixed order: gzip, bzip2, xz, Zstandard, then
/// the zlib header heuristic. The zlib check only validates the method nibble
/// and window size, so arbitrary data can match it. Raw DEFLATE and Brotli are
/// never reported.
pub fn sniff_codec(bytes: &[u8]) -> Option<CodecKind> {
    const SIGNATURES: [(&[u8], CodecKind); 4] = [
        (&[0x1f, 0x8b], CodecKind::Gzip),
        (&[0x42, 0x5a, 0x68], CodecKind::Bzip2),
        (&[0xfd, 0x37, 0x7a, 0x58], CodecKind::Lzma),
        (&[0x28, 0xb5, 0x2f, 0xfd], CodecKind::Zstd),
    ];

    let codec = SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|&(_, codec)| codec)
        .or_else(|| match bytes {
            [cmf, _, ..] if cmf & 0x0f == 0x08 && cmf >> 4 <= 7 => Some(CodecKind::Zlib),
            _ => None,
        });

    match codec {
        Some(codec) => debug!(codec = %codec, "sniffed format"),
        None => debug!(prefix_len = bytes.len().min(4), "no known signature"),
    }
    codec
}

/// Sniff the format of `bytes` and build a matching decompressor.
///
/// Only inspects the prefix; the caller still feeds the whole buffer.
pub fn sniff_decompressor(
    bytes: &[u8],
    output_chunk_size: ChunkSize,
) -> Result<Option<Decompressor>> {
    sniff_codec(bytes)
        .map(|codec| Decompressor::new(codec, output_chunk_size))
        .transpose()
}
