//! Buffer-growth engine
//!
//! Turns the bounded single-call primitives into unbounded "give me all of it"
//! operations. The result vector grows by exactly one chunk per iteration and a
//! call that fills its whole window is taken to mean more output may be
//! pending. The loop stops on the first short call and the over-allocation is
//! trimmed before returning.

use crate::contract::{BoundedCompress, BoundedDecompress};
use decoco_types::{ChunkSize, Result};
use tracing::trace;

/// Feed `input` and collect everything the compressor emits for it
pub fn compress_all<C>(compressor: &mut C, input: &[u8], chunk: ChunkSize) -> Result<Vec<u8>>
where
    C: BoundedCompress + ?Sized,
{
    grow(chunk, input, |input, window| {
        compressor.compress_into(input, window)
    })
}

/// End the stream and collect the remaining output and trailer.
///
/// Always makes at least one call, since every format emits some end marker.
pub fn finish_all<C>(compressor: &mut C, chunk: ChunkSize) -> Result<Vec<u8>>
where
    C: BoundedCompress + ?Sized,
{
    grow(chunk, &[], |_, window| compressor.finish_into(window))
}

/// Feed `input` and collect everything the decompressor emits for it
pub fn decompress_all<D>(decompressor: &mut D, input: &[u8], chunk: ChunkSize) -> Result<Vec<u8>>
where
    D: BoundedDecompress + ?Sized,
{
    grow(chunk, input, |input, window| {
        decompressor.decompress_into(input, window)
    })
}

/// The shared loop: offer `input` on the first call only, then empty input
/// with a fresh window until a call comes back short.
fn grow<F>(chunk: ChunkSize, input: &[u8], mut call: F) -> Result<Vec<u8>>
where
    F: FnMut(&[u8], &mut [u8]) -> Result<usize>,
{
    let chunk = chunk.get();
    let mut input = Some(input);
    let mut out = Vec::new();
    let mut len = 0;
    let mut calls = 0usize;

    loop {
        out.resize(len + chunk, 0);
        let written = call(input.take().unwrap_or(&[]), &mut out[len..])?;
        assert!(
            written <= chunk,
            "bounded call reported {written} bytes for a {chunk}-byte window"
        );
        len += written;
        calls += 1;
        if written < chunk {
            break;
        }
    }

    out.truncate(len);
    trace!(chunk, calls, total = len, "growth loop drained");
    Ok(out)
}
