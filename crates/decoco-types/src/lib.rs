//! Shared codec vocabulary and error handling for decoco
//!
//! This crate provides the types every other decoco crate agrees on:
//!
//! - **Codecs**: the closed set of supported formats and their canonical names
//! - **Configuration values**: compression level presets and validated chunk sizes
//! - **Error handling**: data, engine and lookup errors with severity levels
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use decoco_types::{ChunkSize, CodecKind, Level};
//!
//! let codec = CodecKind::from_name("zstd").unwrap();
//! let chunk = ChunkSize::new(4096).unwrap();
//! assert_eq!(codec, CodecKind::Zstd);
//! assert_eq!(chunk.get(), 4096);
//! assert_eq!(Level::default(), Level::Balanced);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use config::{ChunkSize, Level};
pub use error::{Error, ErrorKind, ErrorSeverity};
pub use result::Result;
pub use types::*;
