//! Bounded streaming contract
//!
//! Every codec adapter implements the same single-call shape: feed some input,
//! write at most `output.len()` bytes, report how many were written. A call is
//! *drained* when it returns fewer bytes than the window it was offered;
//! returning exactly the window length means more output may be pending.
//!
//! Each adapter holds at most one pending input span. New input may only be
//! supplied once the previous span is fully consumed; doing otherwise is a
//! caller bug and panics.

use decoco_types::{CodecKind, Result, StreamStats};

/// Compression half of the bounded streaming contract
pub trait BoundedCompress {
    /// Codec this adapter produces
    fn codec(&self) -> CodecKind;

    /// Drive the encoder as far as `output` allows.
    ///
    /// A non-empty `input` becomes the new pending input. Pass an empty slice
    /// to keep draining earlier input.
    ///
    /// # Panics
    ///
    /// Panics if `input` is non-empty while earlier input is still pending, or
    /// if the stream has already been finished.
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Signal end-of-stream and drain what the encoder still owes.
    ///
    /// Call repeatedly until it returns fewer bytes than `output.len()`.
    /// Once the trailer has been written in full, further calls return 0.
    ///
    /// # Panics
    ///
    /// Panics if the engine stops making progress before the trailer is
    /// complete.
    fn finish_into(&mut self, output: &mut [u8]) -> Result<usize>;

    /// Running byte totals
    fn stats(&self) -> StreamStats;
}

/// Decompression half of the bounded streaming contract
pub trait BoundedDecompress {
    /// Codec this adapter consumes
    fn codec(&self) -> CodecKind;

    /// Drive the decoder as far as `output` allows.
    ///
    /// Same pending-input rule as [`BoundedCompress::compress_into`]. Once the
    /// stream's end marker has been decoded no further input is consumed.
    ///
    /// # Panics
    ///
    /// Panics if `input` is non-empty while earlier input is still pending.
    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Bytes of the most recently accepted input consumed so far
    fn bytes_used(&self) -> usize;

    /// Whether the decoder has reached the stream's end marker
    fn is_finished(&self) -> bool;

    /// Running byte totals
    fn stats(&self) -> StreamStats;
}

/// The single pending input span an adapter may hold.
///
/// The accepted bytes are copied in so the caller's borrow ends with the call;
/// the buffer is reused across calls.
#[derive(Debug, Default)]
pub(crate) struct PendingInput {
    buf: Vec<u8>,
    pos: usize,
}

impl PendingInput {
    /// Take `input` as the new pending span. Empty input is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if unconsumed bytes from an earlier span remain.
    pub(crate) fn accept(&mut self, codec: CodecKind, input: &[u8]) {
        if input.is_empty() {
            return;
        }
        assert!(
            self.is_drained(),
            "{codec}: new input supplied while {} bytes of earlier input are still pending",
            self.remaining().len()
        );
        self.buf.clear();
        self.buf.extend_from_slice(input);
        self.pos = 0;
    }

    pub(crate) fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    pub(crate) fn advance(&mut self, consumed: usize) {
        assert!(
            consumed <= self.remaining().len(),
            "engine reported consuming {consumed} bytes but only {} were offered",
            self.remaining().len()
        );
        self.pos += consumed;
    }

    /// Bytes of the current span consumed so far
    pub(crate) fn used(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_drained(&self) -> bool {
        self.pos == self.buf.len()
    }
}
