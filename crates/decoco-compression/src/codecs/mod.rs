//! Per-codec engine adapters
//!
//! Each module wraps one native engine and exposes it through the crate's
//! internal step primitives, along with the mapping from [`Level`] presets to
//! the engine's own level scale.
//!
//! [`Level`]: decoco_types::Level

pub(crate) mod brotli;
pub(crate) mod bzip2;
pub(crate) mod flate;
pub(crate) mod gzip;
pub(crate) mod lzma;
pub(crate) mod zstd;
