//! Brotli engine adapter over the `brotli` crate's streaming state machines

use crate::adapter::{DecodeEngine, EncodeEngine, Step};
use brotli::enc::encode::{BrotliEncoderOperation, BrotliEncoderStateStruct};
use brotli::enc::StandardAlloc;
use brotli::{BrotliDecompressStream, BrotliResult, BrotliState};
use decoco_types::{CodecKind, Error, Level, Result};

/// Brotli quality, 0-11
pub(crate) fn native_level(level: Level) -> i32 {
    match level {
        Level::Fast => 0,
        Level::Balanced => 7,
        Level::Small => 11,
    }
}

pub(crate) struct BrotliEncoder {
    state: Box<BrotliEncoderStateStruct<StandardAlloc>>,
}

impl BrotliEncoder {
    pub(crate) fn new(level: Level) -> Self {
        let mut state = BrotliEncoderStateStruct::new(StandardAlloc::default());
        state.params.quality = native_level(level);
        Self {
            state: Box::new(state),
        }
    }

    fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        op: BrotliEncoderOperation,
    ) -> Result<Step> {
        let mut consumed = 0;
        let mut produced = 0;
        let ok = self.state.compress_stream(
            op,
            &mut input.len(),
            input,
            &mut consumed,
            &mut output.len(),
            output,
            &mut produced,
            &mut None,
            &mut |_, _, _, _| (),
        );
        assert!(ok, "{}: encoder rejected a well-formed call", CodecKind::Brotli);
        Ok(Step {
            consumed,
            produced,
            done: self.state.is_finished(),
        })
    }
}

impl EncodeEngine for BrotliEncoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Brotli
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let step = self.run(input, output, BrotliEncoderOperation::BROTLI_OPERATION_PROCESS)?;
        Ok(Step::progress(step.consumed, step.produced))
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        self.run(input, output, BrotliEncoderOperation::BROTLI_OPERATION_FINISH)
    }
}

pub(crate) struct BrotliDecoder {
    state: Box<BrotliState<StandardAlloc, StandardAlloc, StandardAlloc>>,
}

impl BrotliDecoder {
    pub(crate) fn new() -> Self {
        Self {
            state: Box::new(BrotliState::new(
                StandardAlloc::default(),
                StandardAlloc::default(),
                StandardAlloc::default(),
            )),
        }
    }
}

impl DecodeEngine for BrotliDecoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Brotli
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let mut consumed = 0;
        let mut produced = 0;
        let result = BrotliDecompressStream(
            &mut input.len(),
            &mut consumed,
            input,
            &mut output.len(),
            &mut produced,
            output,
            &mut 0,
            &mut self.state,
        );
        match result {
            BrotliResult::ResultSuccess => Ok(Step::end(consumed, produced)),
            BrotliResult::NeedsMoreInput | BrotliResult::NeedsMoreOutput => {
                Ok(Step::progress(consumed, produced))
            }
            BrotliResult::ResultFailure => {
                Err(Error::decode(CodecKind::Brotli, "invalid compressed data"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_BR: [u8; 10] = [0x8b, 0x02, 0x80, 0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x0a, 0x03];

    #[test]
    fn test_decoder_matches_fixed_vector() {
        let mut decoder = BrotliDecoder::new();
        let mut out = [0u8; 16];
        let step = decoder.decode(&HELLO_BR, &mut out).unwrap();
        assert!(step.done);
        assert_eq!(step.consumed, HELLO_BR.len());
        assert_eq!(&out[..step.produced], b"hello\n");
    }

    #[test]
    fn test_encoder_finishes() {
        let mut encoder = BrotliEncoder::new(Level::Fast);
        let mut out = [0u8; 64];
        let mut written = 0;
        let mut input: &[u8] = b"hello hello hello\n";
        loop {
            let step = encoder.finish(input, &mut out[written..]).unwrap();
            input = &input[step.consumed..];
            written += step.produced;
            if step.done {
                break;
            }
        }
        assert!(input.is_empty());

        let mut decoder = BrotliDecoder::new();
        let mut plain = [0u8; 64];
        let step = decoder.decode(&out[..written], &mut plain).unwrap();
        assert!(step.done);
        assert_eq!(&plain[..step.produced], b"hello hello hello\n");
    }

    #[test]
    fn test_native_levels() {
        assert_eq!(native_level(Level::Fast), 0);
        assert_eq!(native_level(Level::Balanced), 7);
        assert_eq!(native_level(Level::Small), 11);
    }
}
