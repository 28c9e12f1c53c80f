//! Uniform streaming compression over several native codec engines
//!
//! This crate puts DEFLATE (raw, zlib and gzip framing), bzip2, xz, Brotli and
//! Zstandard behind one incremental interface. It includes:
//!
//! - **Bounded streaming contract**: feed some input, write at most N bytes,
//!   report how many were written ([`BoundedCompress`], [`BoundedDecompress`])
//! - **Buffer growth**: unbounded convenience calls built on the bounded ones
//!   ([`compress_all`], [`finish_all`], [`decompress_all`])
//! - **Registry**: lookup by codec name and format sniffing
//! - **One-shot helpers**: [`gzip`], [`gunzip`], [`bzip2`], [`bunzip2`],
//!   [`xzip`], [`xunzip`] and friends
//!
//! # Features
//!
//! - `serde`: Enable serialization support for the shared value types
//!
//! # Examples
//!
//! ```rust
//! use decoco_compression::{find_compressor, sniff_decompressor, ChunkSize, Level};
//!
//! let mut compressor = find_compressor("zstd", Level::Fast, ChunkSize::default())?
//!     .expect("zstd is registered");
//! let mut packed = compressor.compress(b"Hello, world!")?;
//! packed.extend(compressor.finish()?);
//!
//! let mut decompressor = sniff_decompressor(&packed, ChunkSize::default())?
//!     .expect("zstd frames are sniffable");
//! assert_eq!(decompressor.decompress(&packed)?, b"Hello, world!");
//! # Ok::<(), decoco_compression::Error>(())
//! ```
//!
//! # Misuse
//!
//! Supplying new input while earlier input is still pending, or compressing
//! after the stream was finished, is a caller bug and panics. Corrupt data is
//! reported as [`Error::Decode`].

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod adapter;
mod codecs;
pub mod compressor;
pub mod contract;
pub mod facade;
pub mod growth;
pub mod registry;

// Re-export main types
pub use compressor::{Compressor, Decompressor, DEFAULT_CHUNK_SIZE};
pub use contract::{BoundedCompress, BoundedDecompress};
pub use decoco_types::{ChunkSize, CodecKind, Error, ErrorKind, Level, Result, StreamStats};
pub use facade::{
    bunzip2, bzip2, compress_named, compress_with, decompress_auto, decompress_named,
    decompress_with, gunzip, gzip, xunzip, xzip,
};
pub use growth::{compress_all, decompress_all, finish_all};
pub use registry::{
    entries, find_compressor, find_decompressor, sniff_codec, sniff_decompressor, RegistryEntry,
};
