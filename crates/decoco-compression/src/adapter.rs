//! Generic adapters over native codec engines
//!
//! Native engines disagree on almost everything: who owns buffers, how "more
//! output pending" is signalled, what a call with no input means. Each codec
//! module translates its engine into a single [`Step`]-returning primitive, and
//! [`StreamEncoder`] / [`StreamDecoder`] turn that primitive into the bounded
//! streaming contract: they own the pending input cursor, keep calling the
//! engine until the window is full or no progress is possible, and remember
//! when the stream has ended.

use crate::contract::{BoundedCompress, BoundedDecompress, PendingInput};
use decoco_types::{CodecKind, Result, StreamStats};
use tracing::{debug, trace};

/// Outcome of one native engine call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Step {
    /// Input bytes the engine consumed
    pub consumed: usize,
    /// Output bytes the engine wrote
    pub produced: usize,
    /// The engine reached the end of the stream
    pub done: bool,
}

impl Step {
    pub(crate) const fn idle() -> Self {
        Self {
            consumed: 0,
            produced: 0,
            done: false,
        }
    }

    pub(crate) const fn progress(consumed: usize, produced: usize) -> Self {
        Self {
            consumed,
            produced,
            done: false,
        }
    }

    pub(crate) const fn end(consumed: usize, produced: usize) -> Self {
        Self {
            consumed,
            produced,
            done: true,
        }
    }

    fn is_idle(&self) -> bool {
        self.consumed == 0 && self.produced == 0
    }
}

/// One native encoder, reduced to two step primitives
pub(crate) trait EncodeEngine {
    fn codec(&self) -> CodecKind;

    /// Consume from `input` and write into `output` without ending the stream
    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step>;

    /// Consume the rest of `input`, then end the stream. `done` is set once the
    /// trailer has been written in full.
    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step>;
}

/// One native decoder, reduced to a step primitive
pub(crate) trait DecodeEngine {
    fn codec(&self) -> CodecKind;

    /// Consume from `input` and write into `output`. `done` is set when the
    /// stream's end marker has been decoded and verified.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step>;
}

/// Bounded-contract compressor over any [`EncodeEngine`]
pub(crate) struct StreamEncoder<E> {
    engine: E,
    pending: PendingInput,
    stats: StreamStats,
    finished: bool,
}

impl<E: EncodeEngine> StreamEncoder<E> {
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            pending: PendingInput::default(),
            stats: StreamStats::new(),
            finished: false,
        }
    }

    fn record(&mut self, step: Step) {
        self.pending.advance(step.consumed);
        self.stats.record(step.consumed, step.produced);
    }
}

impl<E: EncodeEngine> BoundedCompress for StreamEncoder<E> {
    fn codec(&self) -> CodecKind {
        self.engine.codec()
    }

    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let codec = self.engine.codec();
        assert!(
            !(self.finished && !input.is_empty()),
            "{codec}: input supplied after the stream was finished"
        );
        if self.finished {
            return Ok(0);
        }
        self.pending.accept(codec, input);

        let mut produced = 0;
        loop {
            let step = self
                .engine
                .encode(self.pending.remaining(), &mut output[produced..])?;
            self.record(step);
            produced += step.produced;
            if produced == output.len() || step.is_idle() {
                break;
            }
        }

        trace!(
            codec = %codec,
            produced,
            pending = self.pending.remaining().len(),
            "compress call"
        );
        Ok(produced)
    }

    fn finish_into(&mut self, output: &mut [u8]) -> Result<usize> {
        if self.finished {
            return Ok(0);
        }

        let mut produced = 0;
        loop {
            let step = self
                .engine
                .finish(self.pending.remaining(), &mut output[produced..])?;
            self.record(step);
            produced += step.produced;
            if step.done {
                self.finished = true;
                debug!(
                    codec = %self.engine.codec(),
                    bytes_in = self.stats.bytes_in,
                    bytes_out = self.stats.bytes_out,
                    "stream finished"
                );
                break;
            }
            if produced == output.len() {
                break;
            }
            assert!(
                !step.is_idle(),
                "{}: encoder made no progress while finishing the stream",
                self.engine.codec()
            );
        }
        Ok(produced)
    }

    fn stats(&self) -> StreamStats {
        self.stats
    }
}

/// Bounded-contract decompressor over any [`DecodeEngine`]
pub(crate) struct StreamDecoder<D> {
    engine: D,
    pending: PendingInput,
    stats: StreamStats,
    finished: bool,
}

impl<D: DecodeEngine> StreamDecoder<D> {
    pub(crate) fn new(engine: D) -> Self {
        Self {
            engine,
            pending: PendingInput::default(),
            stats: StreamStats::new(),
            finished: false,
        }
    }
}

impl<D: DecodeEngine> BoundedDecompress for StreamDecoder<D> {
    fn codec(&self) -> CodecKind {
        self.engine.codec()
    }

    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.pending.accept(self.engine.codec(), input);

        let mut produced = 0;
        while !self.finished {
            let step = self
                .engine
                .decode(self.pending.remaining(), &mut output[produced..])?;
            self.pending.advance(step.consumed);
            self.stats.record(step.consumed, step.produced);
            produced += step.produced;

            if step.done {
                self.finished = true;
                debug!(
                    codec = %self.engine.codec(),
                    bytes_used = self.pending.used(),
                    trailing = self.pending.remaining().len(),
                    bytes_out = self.stats.bytes_out,
                    "end of stream"
                );
                break;
            }
            if produced == output.len() || step.is_idle() {
                break;
            }
        }

        trace!(codec = %self.engine.codec(), produced, "decompress call");
        Ok(produced)
    }

    fn bytes_used(&self) -> usize {
        self.pending.used()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn stats(&self) -> StreamStats {
        self.stats
    }
}

/// Framing bytes waiting to be copied into caller windows
#[derive(Debug, Default)]
pub(crate) struct Staged {
    buf: Vec<u8>,
    pos: usize,
}

impl Staged {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { buf: bytes, pos: 0 }
    }

    /// Copy as much as fits into `output`, returning the count copied
    pub(crate) fn drain_into(&mut self, output: &mut [u8]) -> usize {
        let n = (self.buf.len() - self.pos).min(output.len());
        output[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }
}
