//! One-shot whole-buffer helpers
//!
//! Each helper builds a default-configured adapter, runs it to completion and
//! returns the concatenated output. Decompression stops at the first stream's
//! end marker; anything after it is ignored.

use crate::compressor::{Compressor, Decompressor};
use crate::registry::{find_compressor, find_decompressor, sniff_decompressor};
use decoco_types::{ChunkSize, CodecKind, Error, Level, Result};
use tracing::warn;

/// Compress all of `input` and end the stream
pub fn compress_with(compressor: &mut Compressor, input: &[u8]) -> Result<Vec<u8>> {
    let mut out = compressor.compress(input)?;
    out.extend(compressor.finish()?);
    Ok(out)
}

/// Decompress `input` up to the end of its first stream.
///
/// Returns [`Error::Truncated`] if `input` runs out before the stream's end
/// marker.
pub fn decompress_with(decompressor: &mut Decompressor, input: &[u8]) -> Result<Vec<u8>> {
    let mut out = decompressor.decompress(input)?;
    while !decompressor.is_finished() {
        let more = decompressor.decompress(&[])?;
        if more.is_empty() {
            break;
        }
        out.extend(more);
    }

    if !decompressor.is_finished() {
        return Err(Error::Truncated {
            codec: decompressor.codec(),
        });
    }
    let used = decompressor.bytes_used();
    if used < input.len() {
        warn!(
            codec = %decompressor.codec(),
            used,
            trailing = input.len() - used,
            "ignoring bytes after the end of the stream"
        );
    }
    Ok(out)
}

fn compress_default(codec: CodecKind, input: &[u8]) -> Result<Vec<u8>> {
    compress_with(&mut Compressor::with_defaults(codec)?, input)
}

fn decompress_default(codec: CodecKind, input: &[u8]) -> Result<Vec<u8>> {
    decompress_with(&mut Decompressor::with_defaults(codec)?, input)
}

/// gzip-compress `input`
///
/// # Examples
///
/// ```rust
/// let packed = decoco_compression::gzip(b"hello\n")?;
/// assert_eq!(decoco_compression::gunzip(&packed)?, b"hello\n");
/// # Ok::<(), decoco_compression::Error>(())
/// ```
pub fn gzip(input: &[u8]) -> Result<Vec<u8>> {
    compress_default(CodecKind::Gzip, input)
}

/// Decompress a gzip stream
pub fn gunzip(input: &[u8]) -> Result<Vec<u8>> {
    decompress_default(CodecKind::Gzip, input)
}

/// bzip2-compress `input`
pub fn bzip2(input: &[u8]) -> Result<Vec<u8>> {
    compress_default(CodecKind::Bzip2, input)
}

/// Decompress a bzip2 stream
pub fn bunzip2(input: &[u8]) -> Result<Vec<u8>> {
    decompress_default(CodecKind::Bzip2, input)
}

/// xz-compress `input`
pub fn xzip(input: &[u8]) -> Result<Vec<u8>> {
    compress_default(CodecKind::Lzma, input)
}

/// Decompress an xz stream
pub fn xunzip(input: &[u8]) -> Result<Vec<u8>> {
    decompress_default(CodecKind::Lzma, input)
}

/// Compress with the codec registered under `name`
pub fn compress_named(name: &str, input: &[u8]) -> Result<Vec<u8>> {
    let mut compressor = find_compressor(name, Level::default(), ChunkSize::default())?
        .ok_or_else(|| Error::unknown_codec(name))?;
    compress_with(&mut compressor, input)
}

/// Decompress with the codec registered under `name`
pub fn decompress_named(name: &str, input: &[u8]) -> Result<Vec<u8>> {
    let mut decompressor = find_decompressor(name, ChunkSize::default())?
        .ok_or_else(|| Error::unknown_codec(name))?;
    decompress_with(&mut decompressor, input)
}

/// Sniff the format of `input` and decompress it.
///
/// Raw DEFLATE and Brotli cannot be sniffed and give
/// [`Error::UnrecognizedFormat`].
pub fn decompress_auto(input: &[u8]) -> Result<Vec<u8>> {
    let mut decompressor =
        sniff_decompressor(input, ChunkSize::default())?.ok_or(Error::UnrecognizedFormat)?;
    decompress_with(&mut decompressor, input)
}
