//! Gzip (RFC 1952) framing around the raw DEFLATE engine
//!
//! The header is written by hand so the output is byte-stable: zero mtime, no
//! file name, OS byte 3 (Unix). The body is raw DEFLATE and the trailer is the
//! CRC-32 and length of the uncompressed data, both little-endian.

use super::flate::{FlateDecoder, FlateEncoder};
use crate::adapter::{DecodeEngine, EncodeEngine, Staged, Step};
use decoco_types::{CodecKind, Error, Level, Result};
use flate2::{Crc, FlushCompress};

const MAGIC: [u8; 2] = [0x1f, 0x8b];
const METHOD_DEFLATE: u8 = 8;
const OS_UNIX: u8 = 3;
const TRAILER_LEN: usize = 8;
/// Room for a maximal FEXTRA field plus generous name and comment fields
const MAX_HEADER_LEN: usize = 128 * 1024;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;
const FRESERVED: u8 = 0xe0;

/// The fixed 10-byte header this crate writes
fn header(level: Level) -> Vec<u8> {
    let xfl = match level {
        Level::Small => 2,
        Level::Fast => 4,
        Level::Balanced => 0,
    };
    vec![
        MAGIC[0],
        MAGIC[1],
        METHOD_DEFLATE,
        0,
        0,
        0,
        0,
        0,
        xfl,
        OS_UNIX,
    ]
}

pub(crate) struct GzipEncoder {
    deflate: FlateEncoder,
    crc: Crc,
    header: Staged,
    trailer: Option<Staged>,
}

impl GzipEncoder {
    pub(crate) fn new(level: Level) -> Self {
        Self {
            deflate: FlateEncoder::raw(level),
            crc: Crc::new(),
            header: Staged::new(header(level)),
            trailer: None,
        }
    }

    /// Run the body encoder after the header has been flushed
    fn body(&mut self, input: &[u8], output: &mut [u8], flush: FlushCompress) -> Result<Step> {
        let step = self.deflate.run(input, output, flush)?;
        self.crc.update(&input[..step.consumed]);
        Ok(step)
    }
}

impl EncodeEngine for GzipEncoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Gzip
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let written = self.header.drain_into(output);
        if !self.header.is_empty() {
            return Ok(Step::progress(0, written));
        }
        let step = self.body(input, &mut output[written..], FlushCompress::None)?;
        Ok(Step::progress(step.consumed, written + step.produced))
    }

    fn finish(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let mut written = self.header.drain_into(output);
        if !self.header.is_empty() {
            return Ok(Step::progress(0, written));
        }

        let mut consumed = 0;
        if self.trailer.is_none() {
            let step = self.body(input, &mut output[written..], FlushCompress::Finish)?;
            consumed = step.consumed;
            written += step.produced;
            if !step.done {
                return Ok(Step::progress(consumed, written));
            }
            let mut trailer = Vec::with_capacity(TRAILER_LEN);
            trailer.extend_from_slice(&self.crc.sum().to_le_bytes());
            trailer.extend_from_slice(&self.crc.amount().to_le_bytes());
            self.trailer = Some(Staged::new(trailer));
        }

        let Some(trailer) = self.trailer.as_mut() else {
            return Ok(Step::progress(consumed, written));
        };
        written += trailer.drain_into(&mut output[written..]);
        Ok(Step {
            consumed,
            produced: written,
            done: trailer.is_empty(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Header,
    Body,
    Trailer,
    Done,
}

pub(crate) struct GzipDecoder {
    state: DecodeState,
    header: Vec<u8>,
    inflate: FlateDecoder,
    crc: Crc,
    trailer: Vec<u8>,
}

impl GzipDecoder {
    pub(crate) fn new() -> Self {
        Self {
            state: DecodeState::Header,
            header: Vec::new(),
            inflate: FlateDecoder::raw(),
            crc: Crc::new(),
            trailer: Vec::with_capacity(TRAILER_LEN),
        }
    }

    fn read_header(&mut self, input: &[u8]) -> Result<Step> {
        if input.is_empty() {
            return Ok(Step::idle());
        }
        let before = self.header.len();
        let take = input.len().min(MAX_HEADER_LEN - before);
        self.header.extend_from_slice(&input[..take]);

        match parse_header(&self.header)? {
            Some(len) => {
                // Bytes past the header belong to the body.
                let consumed = len - before;
                self.header.clear();
                self.state = DecodeState::Body;
                Ok(Step::progress(consumed, 0))
            }
            None if self.header.len() == MAX_HEADER_LEN => {
                Err(Error::decode(CodecKind::Gzip, "header too long"))
            }
            None => Ok(Step::progress(take, 0)),
        }
    }

    fn read_body(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        let step = self.inflate.run(CodecKind::Gzip, input, output)?;
        self.crc.update(&output[..step.produced]);
        if step.done {
            self.state = DecodeState::Trailer;
        }
        Ok(Step::progress(step.consumed, step.produced))
    }

    fn read_trailer(&mut self, input: &[u8]) -> Result<Step> {
        let take = (TRAILER_LEN - self.trailer.len()).min(input.len());
        if take == 0 {
            return Ok(Step::idle());
        }
        self.trailer.extend_from_slice(&input[..take]);
        if self.trailer.len() < TRAILER_LEN {
            return Ok(Step::progress(take, 0));
        }

        let crc = u32::from_le_bytes([
            self.trailer[0],
            self.trailer[1],
            self.trailer[2],
            self.trailer[3],
        ]);
        let isize = u32::from_le_bytes([
            self.trailer[4],
            self.trailer[5],
            self.trailer[6],
            self.trailer[7],
        ]);
        if crc != self.crc.sum() {
            return Err(Error::decode(CodecKind::Gzip, "CRC-32 mismatch"));
        }
        if isize != self.crc.amount() {
            return Err(Error::decode(CodecKind::Gzip, "length mismatch"));
        }
        self.state = DecodeState::Done;
        Ok(Step::end(take, 0))
    }
}

impl DecodeEngine for GzipDecoder {
    fn codec(&self) -> CodecKind {
        CodecKind::Gzip
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<Step> {
        match self.state {
            DecodeState::Header => self.read_header(input),
            DecodeState::Body => self.read_body(input, output),
            DecodeState::Trailer => self.read_trailer(input),
            DecodeState::Done => Ok(Step::idle()),
        }
    }
}

/// Length of the complete header at the start of `buf`, or `None` if more
/// bytes are needed to tell.
fn parse_header(buf: &[u8]) -> Result<Option<usize>> {
    let invalid = |message: &str| Error::decode(CodecKind::Gzip, message);

    if buf.iter().zip(MAGIC.iter()).any(|(a, b)| a != b) {
        return Err(invalid("invalid header"));
    }
    if buf.get(2).is_some_and(|&method| method != METHOD_DEFLATE) {
        return Err(invalid("unsupported compression method"));
    }
    if buf.len() < 10 {
        return Ok(None);
    }
    let flags = buf[3];
    if flags & FRESERVED != 0 {
        return Err(invalid("reserved header flags set"));
    }

    let mut pos = 10;
    if flags & FEXTRA != 0 {
        let Some(xlen) = buf.get(pos..pos + 2) else {
            return Ok(None);
        };
        pos += 2 + usize::from(u16::from_le_bytes([xlen[0], xlen[1]]));
    }
    for flag in [FNAME, FCOMMENT] {
        if flags & flag != 0 {
            let Some(field) = buf.get(pos..) else {
                return Ok(None);
            };
            let Some(nul) = field.iter().position(|&b| b == 0) else {
                return Ok(None);
            };
            pos += nul + 1;
        }
    }
    if flags & FHCRC != 0 {
        let Some(stored) = buf.get(pos..pos + 2) else {
            return Ok(None);
        };
        let mut crc = Crc::new();
        crc.update(&buf[..pos]);
        if u16::from_le_bytes([stored[0], stored[1]]) != crc.sum() as u16 {
            return Err(invalid("header checksum mismatch"));
        }
        pos += 2;
    }

    Ok((buf.len() >= pos).then_some(pos))
}
