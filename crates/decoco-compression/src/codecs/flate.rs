//! DEFLATE engine adapters (raw and zlib-framed)
//!
//! Both variants drive the same `flate2` engine; the only difference is
//! whether the engine writes the 2-byte zlib header and Adler-32 trailer.

use crate::adapter::{DecodeEngine, EncodeEngine, Step};
use decoco_types::{CodecKind, Error, Level, Result};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

/// Map a level preset onto zlib's 0-9 scale
pub(crate) fn native_level(level: Level) -> Compression {
    match level {
        Level::Fast => Compression::fast(),
        Level::Balanced => Compression::default(),
        Level::Small => Compression::best(),
    }
}

/// DEFLATE encoder, optionally zlib-framed
pub(crate) struct FlateEncoder {
    inner: Compress,
    codec: CodecKind,
}

impl FlateEncoder {
    /// Headerless RFC 1951 output
    pub(crate) fn raw(level: Level) -> Self {
        Self {
            inner: Compress::new(native_level(level), false),
            codec: CodecKind::Deflate,
        }
    }

    /// RFC 1950 output
    pub(crate) fn zlib(level: Level) -> Self {
        Self {
            inner: Compress::new(native_level(level), true),
            codec: CodecKind::Zlib,
        }
    }

    /// One engine call; `done` is set when the engine reports end of stream.
    pub(crate) fn run(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushCompress,
    ) -> Result<Step> {
        let codec = self.codec;
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .compress(input, output, flush)
            .unwrap_or_else(|e| panic!("{codec}: encoder rejected a well-formed call: {e}"));
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        Ok(match status {
            Status::StreamEnd => Step::end(consumed, produced),
            // BufError only means this call could not move any bytes.
            Status::Ok | Status::BufError => Step::progress(consumed, produced),
        })
    }
}

impl EncodeEngine for FlateEncoder {
    fn codec(&self) -> CodecKind {
        self.codec
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        self.run(input, output, FlushCompress::None)
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        self.run(input, output, FlushCompress::Finish)
    }
}

/// DEFLATE decoder, optionally expecting zlib framing
pub(crate) struct FlateDecoder {
    inner: Decompress,
    codec: CodecKind,
}

impl FlateDecoder {
    pub(crate) fn raw() -> Self {
        Self {
            inner: Decompress::new(false),
            codec: CodecKind::Deflate,
        }
    }

    pub(crate) fn zlib() -> Self {
        Self {
            inner: Decompress::new(true),
            codec: CodecKind::Zlib,
        }
    }

    /// Decode with an explicit codec label, used by the gzip adapter for its body.
    pub(crate) fn run(
        &mut self,
        codec: CodecKind,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<Step> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .decompress(input, output, FlushDecompress::None)
            .map_err(|e| Error::decode(codec, e.to_string()))?;
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;

        Ok(match status {
            Status::StreamEnd => Step::end(consumed, produced),
            Status::Ok | Status::BufError => Step::progress(consumed, produced),
        })
    }
}

impl DecodeEngine for FlateDecoder {
    fn codec(&self) -> CodecKind {
        self.codec
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        self.run(self.codec, input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_header_for_default_level() {
        let mut encoder = FlateEncoder::zlib(Level::Balanced);
        let mut out = [0u8; 64];
        let step = encoder.finish(b"hello\n", &mut out).unwrap();
        assert!(step.done);
        assert_eq!(step.consumed, 6);
        assert_eq!(&out[..2], &[0x78, 0x9c]);
    }

    #[test]
    fn test_raw_has_no_header() {
        let mut encoder = FlateEncoder::raw(Level::Balanced);
        let mut out = [0u8; 64];
        let step = encoder.finish(b"hello\n", &mut out).unwrap();
        assert!(step.done);
        assert_eq!(
            &out[..step.produced],
            &[0xcb, 0x48, 0xcd, 0xc9, 0xc9, 0xe7, 0x02, 0x00]
        );
    }

    #[test]
    fn test_decoder_reports_end() {
        let mut decoder = FlateDecoder::raw();
        let mut out = [0u8; 16];
        let step = decoder
            .decode(&[0xcb, 0x48, 0xcd, 0xc9, 0xc9, 0xe7, 0x02, 0x00], &mut out)
            .unwrap();
        assert!(step.done);
        assert_eq!(step.consumed, 8);
        assert_eq!(&out[..step.produced], b"hello\n");
    }

    #[test]
    fn test_corrupt_zlib_header_is_decode_error() {
        let mut decoder = FlateDecoder::zlib();
        let mut out = [0u8; 16];
        let error = decoder.decode(&[0x78, 0x00, 0xff, 0xff], &mut out).unwrap_err();
        assert!(matches!(error, Error::Decode { codec: CodecKind::Zlib, .. }));
    }

    #[test]
    fn test_native_levels() {
        assert_eq!(native_level(Level::Fast).level(), 1);
        assert_eq!(native_level(Level::Balanced).level(), 6);
        assert_eq!(native_level(Level::Small).level(), 9);
    }
}
