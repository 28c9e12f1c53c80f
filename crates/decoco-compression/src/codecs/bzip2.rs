//! bzip2 engine adapter

use crate::adapter::{DecodeEngine, EncodeEngine, Step};
use bzip2::{Action, Compress, Compression, Decompress, Status};
use decoco_types::{CodecKind, Error, Level, Result};

/// libbzip2's default work factor
const WORK_FACTOR: u32 = 30;

/// Block size in 100k units
pub(crate) fn native_level(level: Level) -> u32 {
    match level {
        Level::Fast => 1,
        Level::Balanced => 6,
        Level::Small => 9,
    }
}

fn map_error(error: bzip2::Error) -> Error {
    match error {
        bzip2::Error::Data | bzip2::Error::DataMagic => {
            Error::decode(CodecKind::Bzip2, error.to_string())
        }
        // The adapter drove the engine out of order.
        bzip2::Error::Sequence | bzip2::Error::Param => {
            panic!("{}: engine rejected a well-formed call: {error}", CodecKind::Bzip2)
        }
    }
}

pub(crate) struct Bzip2Encoder {
    inner: Compress,
}

impl Bzip2Encoder {
    pub(crate) fn new(level: Level) -> Self {
        Self {
            inner: Compress::new(Compression::new(native_level(level)), WORK_FACTOR),
        }
    }

    fn run(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<Step> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .compress(input, output, action)
            .map_err(map_error)?;
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        match status {
            Status::StreamEnd => Ok(Step::end(consumed, produced)),
            Status::MemNeeded => Err(Error::engine(CodecKind::Bzip2, "out of memory")),
            _ => Ok(Step::progress(consumed, produced)),
        }
    }
}

impl EncodeEngine for Bzip2Encoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Bzip2
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        // libbzip2 rejects a run request with nothing to consume.
        if input.is_empty() || output.is_empty() {
            return Ok(Step::idle());
        }
        self.run(input, output, Action::Run)
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        if output.is_empty() {
            return Ok(Step::idle());
        }
        self.run(input, output, Action::Finish)
    }
}

pub(crate) struct Bzip2Decoder {
    inner: Decompress,
}

impl Bzip2Decoder {
    pub(crate) fn new() -> Self {
        Self {
            inner: Decompress::new(false),
        }
    }
}

impl DecodeEngine for Bzip2Decoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Bzip2
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        if output.is_empty() {
            return Ok(Step::idle());
        }
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self.inner.decompress(input, output).map_err(map_error)?;
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        match status {
            Status::StreamEnd => Ok(Step::end(consumed, produced)),
            Status::MemNeeded => Err(Error::engine(CodecKind::Bzip2, "out of memory")),
            _ => Ok(Step::progress(consumed, produced)),
        }
    }
}
