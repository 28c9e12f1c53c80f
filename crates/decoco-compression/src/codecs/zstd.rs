//! Zstandard engine adapter

use crate::adapter::{DecodeEngine, EncodeEngine, Step};
use decoco_types::{CodecKind, Error, Level, Result};
use zstd::stream::raw::{CParameter, Decoder, Encoder, InBuffer, Operation, OutBuffer};

/// zstd compression level
pub(crate) fn native_level(level: Level) -> i32 {
    match level {
        Level::Fast => 1,
        Level::Balanced => 7,
        Level::Small => 18,
    }
}

fn engine_fault(error: &std::io::Error) -> ! {
    panic!("{}: encoder rejected a well-formed call: {error}", CodecKind::Zstd)
}

pub(crate) struct ZstdEncoder {
    inner: Encoder<'static>,
}

impl ZstdEncoder {
    pub(crate) fn new(level: Level) -> Result<Self> {
        let engine_error = |e: std::io::Error| Error::engine(CodecKind::Zstd, e.to_string());
        let mut inner = Encoder::new(native_level(level)).map_err(engine_error)?;
        inner
            .set_parameter(CParameter::ChecksumFlag(true))
            .map_err(engine_error)?;
        Ok(Self { inner })
    }
}

impl EncodeEngine for ZstdEncoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Zstd
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);
        self.inner
            .run(&mut src, &mut dst)
            .unwrap_or_else(|e| engine_fault(&e));
        Ok(Step::progress(src.pos(), dst.pos()))
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        // The end-of-frame directive takes no input, so drain pending input first.
        if !input.is_empty() {
            return self.encode(input, output);
        }
        let mut dst = OutBuffer::around(output);
        let remaining = self
            .inner
            .finish(&mut dst, true)
            .unwrap_or_else(|e| engine_fault(&e));
        Ok(Step {
            consumed: 0,
            produced: dst.pos(),
            done: remaining == 0,
        })
    }
}

pub(crate) struct ZstdDecoder {
    inner: Decoder<'static>,
}

impl ZstdDecoder {
    pub(crate) fn new() -> Result<Self> {
        let inner = Decoder::new().map_err(|e| Error::engine(CodecKind::Zstd, e.to_string()))?;
        Ok(Self { inner })
    }
}

impl DecodeEngine for ZstdDecoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Zstd
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let mut src = InBuffer::around(input);
        let mut dst = OutBuffer::around(output);
        let hint = self
            .inner
            .run(&mut src, &mut dst)
            .map_err(|e| Error::decode(CodecKind::Zstd, e.to_string()))?;
        let (consumed, produced) = (src.pos(), dst.pos());
        // A zero hint means the frame is decoded and fully flushed.
        if hint == 0 {
            Ok(Step::end(consumed, produced))
        } else {
            Ok(Step::progress(consumed, produced))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_ZST: [u8; 19] = [
        0x28, 0xb5, 0x2f, 0xfd, 0x04, 0x58, 0x31, 0x00, 0x00, 0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x0a,
        0x53, 0x88, 0xbd, 0x91,
    ];

    #[test]
    fn test_decoder_matches_fixed_vector() {
        let mut decoder = ZstdDecoder::new().unwrap();
        let mut out = [0u8; 16];
        let step = decoder.decode(&HELLO_ZST, &mut out).unwrap();
        assert!(step.done);
        assert_eq!(step.consumed, HELLO_ZST.len());
        assert_eq!(&out[..step.produced], b"hello\n");
    }

    #[test]
    fn test_decoder_leaves_trailing_bytes() {
        let mut framed = HELLO_ZST.to_vec();
        framed.extend_from_slice(b"xyz");
        let mut decoder = ZstdDecoder::new().unwrap();
        let mut out = [0u8; 16];
        let step = decoder.decode(&framed, &mut out).unwrap();
        assert!(step.done);
        assert_eq!(step.consumed, HELLO_ZST.len());
    }

    #[test]
    fn test_checksum_flag_is_set() {
        let mut encoder = ZstdEncoder::new(Level::Fast).unwrap();
        let mut out = [0u8; 64];
        let step = encoder.encode(b"hello\n", &mut out).unwrap();
        assert_eq!(step.consumed, 6);
        let mut written = step.produced;
        loop {
            let step = encoder.finish(&[], &mut out[written..]).unwrap();
            written += step.produced;
            if step.done {
                break;
            }
        }
        assert_eq!(&out[..4], &[0x28, 0xb5, 0x2f, 0xfd]);
        // Frame header descriptor: bit 2 is the content checksum flag.
        assert_ne!(out[4] & 0x04, 0);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let mut decoder = ZstdDecoder::new().unwrap();
        let mut out = [0u8; 16];
        let error = decoder.decode(b"not a zstd frame", &mut out).unwrap_err();
        assert!(matches!(error, Error::Decode { codec: CodecKind::Zstd, .. }));
    }
}
