//! Compressor and decompressor handles
//!
//! [`Compressor`] and [`Decompressor`] are closed sums over the seven codec
//! variants. Each owns exactly one native engine, acquired at construction and
//! released when the handle is dropped, plus the chunk size its own growth loop
//! uses.

use crate::adapter::{StreamDecoder, StreamEncoder};
use crate::codecs::brotli::{self, BrotliDecoder, BrotliEncoder};
use crate::codecs::bzip2::{self, Bzip2Decoder, Bzip2Encoder};
use crate::codecs::flate::{self, FlateDecoder, FlateEncoder};
use crate::codecs::gzip::{GzipDecoder, GzipEncoder};
use crate::codecs::lzma::{self, LzmaDecoder, LzmaEncoder};
use crate::codecs::zstd::{self, ZstdDecoder, ZstdEncoder};
use crate::contract::{BoundedCompress, BoundedDecompress};
use crate::growth;
use decoco_types::{ChunkSize, CodecKind, Level, Result, StreamStats};
use tracing::debug;

/// Default chunk size for both directions (16 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = ChunkSize::DEFAULT;

enum Encoders {
    Deflate(StreamEncoder<FlateEncoder>),
    Zlib(StreamEncoder<FlateEncoder>),
    Gzip(StreamEncoder<GzipEncoder>),
    Bzip2(StreamEncoder<Bzip2Encoder>),
    Lzma(StreamEncoder<LzmaEncoder>),
    Brotli(StreamEncoder<BrotliEncoder>),
    Zstd(StreamEncoder<ZstdEncoder>),
}

enum Decoders {
    Deflate(StreamDecoder<FlateDecoder>),
    Zlib(StreamDecoder<FlateDecoder>),
    Gzip(StreamDecoder<GzipDecoder>),
    Bzip2(StreamDecoder<Bzip2Decoder>),
    Lzma(StreamDecoder<LzmaDecoder>),
    Brotli(StreamDecoder<BrotliDecoder>),
    Zstd(StreamDecoder<ZstdDecoder>),
}

/// Forward a call to whichever adapter a sum type holds
macro_rules! dispatch {
    ($kind:ident, $value:expr, $adapter:ident => $body:expr) => {
        match $value {
            $kind::Deflate($adapter) | $kind::Zlib($adapter) => $body,
            $kind::Gzip($adapter) => $body,
            $kind::Bzip2($adapter) => $body,
            $kind::Lzma($adapter) => $body,
            $kind::Brotli($adapter) => $body,
            $kind::Zstd($adapter) => $body,
        }
    };
}

/// Incremental compressor for one codec
///
/// # Examples
///
/// ```rust
/// use decoco_compression::{ChunkSize, Compressor, Level};
///
/// let mut compressor = Compressor::gzip(Level::Balanced, ChunkSize::default())?;
/// let mut out = compressor.compress(b"hello\n")?;
/// out.extend(compressor.finish()?);
/// assert_eq!(&out[..2], &[0x1f, 0x8b]);
/// # Ok::<(), decoco_compression::Error>(())
/// ```
pub struct Compressor {
    inner: Encoders,
    level: Level,
    chunk_size: ChunkSize,
}

impl Compressor {
    /// Create a compressor for `codec`
    pub fn new(codec: CodecKind, level: Level, chunk_size: ChunkSize) -> Result<Self> {
        let (inner, native_level) = match codec {
            CodecKind::Deflate => (
                Encoders::Deflate(StreamEncoder::new(FlateEncoder::raw(level))),
                i64::from(flate::native_level(level).level()),
            ),
            CodecKind::Zlib => (
                Encoders::Zlib(StreamEncoder::new(FlateEncoder::zlib(level))),
                i64::from(flate::native_level(level).level()),
            ),
            CodecKind::Gzip => (
                Encoders::Gzip(StreamEncoder::new(GzipEncoder::new(level))),
                i64::from(flate::native_level(level).level()),
            ),
            CodecKind::Bzip2 => (
                Encoders::Bzip2(StreamEncoder::new(Bzip2Encoder::new(level))),
                i64::from(bzip2::native_level(level)),
            ),
            CodecKind::Lzma => (
                Encoders::Lzma(StreamEncoder::new(LzmaEncoder::new(level)?)),
                i64::from(lzma::native_level(level)),
            ),
            CodecKind::Brotli => (
                Encoders::Brotli(StreamEncoder::new(BrotliEncoder::new(level))),
                i64::from(brotli::native_level(level)),
            ),
            CodecKind::Zstd => (
                Encoders::Zstd(StreamEncoder::new(ZstdEncoder::new(level)?)),
                i64::from(zstd::native_level(level)),
            ),
        };

        debug!(
            codec = %codec,
            ?level,
            native_level,
            chunk_size = chunk_size.get(),
            "created compressor"
        );
        Ok(Self {
            inner,
            level,
            chunk_size,
        })
    }

    /// Compressor with the `Balanced` level and the default chunk size
    pub fn with_defaults(codec: CodecKind) -> Result<Self> {
        Self::new(codec, Level::default(), ChunkSize::default())
    }

    /// Raw DEFLATE compressor
    pub fn deflate(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Deflate, level, chunk_size)
    }

    /// zlib-framed compressor
    pub fn zlib(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Zlib, level, chunk_size)
    }

    /// gzip-framed compressor
    pub fn gzip(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Gzip, level, chunk_size)
    }

    /// bzip2 compressor
    pub fn bzip2(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Bzip2, level, chunk_size)
    }

    /// xz compressor
    pub fn lzma(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Lzma, level, chunk_size)
    }

    /// Brotli compressor
    pub fn brotli(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Brotli, level, chunk_size)
    }

    /// Zstandard compressor (content checksum enabled)
    pub fn zstd(level: Level, chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Zstd, level, chunk_size)
    }

    /// Codec this compressor produces
    pub fn codec(&self) -> CodecKind {
        dispatch!(Encoders, &self.inner, adapter => adapter.codec())
    }

    /// Bounded compress call, see [`BoundedCompress::compress_into`]
    pub fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        dispatch!(Encoders, &mut self.inner, adapter => adapter.compress_into(input, output))
    }

    /// Bounded finish call, see [`BoundedCompress::finish_into`]
    pub fn finish_into(&mut self, output: &mut [u8]) -> Result<usize> {
        dispatch!(Encoders, &mut self.inner, adapter => adapter.finish_into(output))
    }

    /// Running byte totals
    pub fn stats(&self) -> StreamStats {
        dispatch!(Encoders, &self.inner, adapter => adapter.stats())
    }

    /// Level preset this compressor was built with
    pub fn level(&self) -> Level {
        self.level
    }

    /// Window size used by [`compress`](Self::compress) and [`finish`](Self::finish)
    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    /// Compress `input`, returning all output the engine produces for it
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let chunk = self.chunk_size;
        growth::compress_all(self, input, chunk)
    }

    /// End the stream, returning the remaining output and trailer
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        let chunk = self.chunk_size;
        growth::finish_all(self, chunk)
    }
}

impl BoundedCompress for Compressor {
    fn codec(&self) -> CodecKind {
        Self::codec(self)
    }

    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        Self::compress_into(self, input, output)
    }

    fn finish_into(&mut self, output: &mut [u8]) -> Result<usize> {
        Self::finish_into(self, output)
    }

    fn stats(&self) -> StreamStats {
        Self::stats(self)
    }
}

impl std::fmt::Debug for Compressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compressor")
            .field("codec", &self.codec())
            .field("level", &self.level)
            .field("chunk_size", &self.chunk_size)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Incremental decompressor for one codec
///
/// # Examples
///
/// ```rust
/// use decoco_compression::{ChunkSize, Decompressor};
///
/// let zlib = [0x78, 0x9c, 0xcb, 0x48, 0xcd, 0xc9, 0xc9, 0xe7, 0x02, 0x00, 0x08, 0x4b, 0x02, 0x1f];
/// let mut decompressor = Decompressor::zlib(ChunkSize::default())?;
/// assert_eq!(decompressor.decompress(&zlib)?, b"hello\n");
/// assert!(decompressor.is_finished());
/// # Ok::<(), decoco_compression::Error>(())
/// ```
pub struct Decompressor {
    inner: Decoders,
    output_chunk_size: ChunkSize,
}

impl Decompressor {
    /// Create a decompressor for `codec`
    pub fn new(codec: CodecKind, output_chunk_size: ChunkSize) -> Result<Self> {
        let inner = match codec {
            CodecKind::Deflate => Decoders::Deflate(StreamDecoder::new(FlateDecoder::raw())),
            CodecKind::Zlib => Decoders::Zlib(StreamDecoder::new(FlateDecoder::zlib())),
            CodecKind::Gzip => Decoders::Gzip(StreamDecoder::new(GzipDecoder::new())),
            CodecKind::Bzip2 => Decoders::Bzip2(StreamDecoder::new(Bzip2Decoder::new())),
            CodecKind::Lzma => Decoders::Lzma(StreamDecoder::new(LzmaDecoder::new()?)),
            CodecKind::Brotli => Decoders::Brotli(StreamDecoder::new(BrotliDecoder::new())),
            CodecKind::Zstd => Decoders::Zstd(StreamDecoder::new(ZstdDecoder::new()?)),
        };

        debug!(
            codec = %codec,
            output_chunk_size = output_chunk_size.get(),
            "created decompressor"
        );
        Ok(Self {
            inner,
            output_chunk_size,
        })
    }

    /// Decompressor with the default output chunk size
    pub fn with_defaults(codec: CodecKind) -> Result<Self> {
        Self::new(codec, ChunkSize::default())
    }

    /// Raw DEFLATE decompressor
    pub fn deflate(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Deflate, output_chunk_size)
    }

    /// zlib-framed decompressor
    pub fn zlib(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Zlib, output_chunk_size)
    }

    /// gzip-framed decompressor
    pub fn gzip(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Gzip, output_chunk_size)
    }

    /// bzip2 decompressor
    pub fn bzip2(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Bzip2, output_chunk_size)
    }

    /// xz decompressor, no memory limit
    pub fn lzma(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Lzma, output_chunk_size)
    }

    /// Brotli decompressor
    pub fn brotli(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Brotli, output_chunk_size)
    }

    /// Zstandard decompressor
    pub fn zstd(output_chunk_size: ChunkSize) -> Result<Self> {
        Self::new(CodecKind::Zstd, output_chunk_size)
    }

    /// Codec this decompressor consumes
    pub fn codec(&self) -> CodecKind {
        dispatch!(Decoders, &self.inner, adapter => adapter.codec())
    }

    /// Bounded decompress call, see [`BoundedDecompress::decompress_into`]
    pub fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        dispatch!(Decoders, &mut self.inner, adapter => adapter.decompress_into(input, output))
    }

    /// Bytes of the most recently accepted input consumed so far.
    ///
    /// Stops short of the input length when the stream ended before it.
    pub fn bytes_used(&self) -> usize {
        dispatch!(Decoders, &self.inner, adapter => adapter.bytes_used())
    }

    /// Whether the stream's end marker has been decoded
    pub fn is_finished(&self) -> bool {
        dispatch!(Decoders, &self.inner, adapter => adapter.is_finished())
    }

    /// Running byte totals
    pub fn stats(&self) -> StreamStats {
        dispatch!(Decoders, &self.inner, adapter => adapter.stats())
    }

    /// Window size used by [`decompress`](Self::decompress)
    pub fn output_chunk_size(&self) -> ChunkSize {
        self.output_chunk_size
    }

    /// Decompress `input`, returning all output the engine produces for it.
    ///
    /// Pass an empty slice to keep draining earlier input.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let chunk = self.output_chunk_size;
        growth::decompress_all(self, input, chunk)
    }
}

impl BoundedDecompress for Decompressor {
    fn codec(&self) -> CodecKind {
        Self::codec(self)
    }

    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        Self::decompress_into(self, input, output)
    }

    fn bytes_used(&self) -> usize {
        Self::bytes_used(self)
    }

    fn is_finished(&self) -> bool {
        Self::is_finished(self)
    }

    fn stats(&self) -> StreamStats {
        Self::stats(self)
    }
}

impl std::fmt::Debug for Decompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decompressor")
            .field("codec", &self.codec())
            .field("output_chunk_size", &self.output_chunk_size)
            .field("finished", &self.is_finished())
            .field("stats", &self.stats())
            .finish()
    }
}
