//! xz (LZMA2 container) engine adapter

use crate::adapter::{DecodeEngine, EncodeEngine, Step};
use decoco_types::{CodecKind, Error, Level, Result};
use xz2::stream::{Action, Check, Status, Stream};

/// xz preset, 0-9
pub(crate) fn native_level(level: Level) -> u32 {
    match level {
        Level::Fast => 1,
        Level::Balanced => 6,
        Level::Small => 9,
    }
}

fn map_error(error: xz2::stream::Error) -> Error {
    use xz2::stream::Error as XzError;
    match error {
        XzError::Data
        | XzError::Format
        | XzError::Options
        | XzError::NoCheck
        | XzError::UnsupportedCheck => Error::decode(CodecKind::Lzma, error.to_string()),
        XzError::Mem | XzError::MemLimit => Error::engine(CodecKind::Lzma, error.to_string()),
        XzError::Program => {
            panic!("{}: engine rejected a well-formed call: {error}", CodecKind::Lzma)
        }
    }
}

/// Single engine call shared by both directions
fn process(stream: &mut Stream, input: &[u8], output: &mut [u8], action: Action) -> Result<Step> {
    let before_in = stream.total_in();
    let before_out = stream.total_out();
    let status = stream.process(input, output, action).map_err(map_error)?;
    let consumed = (stream.total_in() - before_in) as usize;
    let produced = (stream.total_out() - before_out) as usize;

    Ok(match status {
        Status::StreamEnd => Step::end(consumed, produced),
        // MemNeeded is how xz2 surfaces a no-progress call.
        Status::Ok | Status::GetCheck | Status::MemNeeded => Step::progress(consumed, produced),
    })
}

pub(crate) struct LzmaEncoder {
    stream: Stream,
}

impl LzmaEncoder {
    pub(crate) fn new(level: Level) -> Result<Self> {
        let stream = Stream::new_easy_encoder(native_level(level), Check::Crc64)
            .map_err(|e| Error::engine(CodecKind::Lzma, e.to_string()))?;
        Ok(Self { stream })
    }
}

impl EncodeEngine for LzmaEncoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Lzma
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        process(&mut self.stream, input, output, Action::Run)
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        process(&mut self.stream, input, output, Action::Finish)
    }
}

pub(crate) struct LzmaDecoder {
    stream: Stream,
}

impl LzmaDecoder {
    pub(crate) fn new() -> Result<Self> {
        let stream = Stream::new_stream_decoder(u64::MAX, 0)
            .map_err(|e| Error::engine(CodecKind::Lzma, e.to_string()))?;
        Ok(Self { stream })
    }
}

impl DecodeEngine for LzmaDecoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Lzma
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        process(&mut self.stream, input, output, Action::Run)
    }
}
