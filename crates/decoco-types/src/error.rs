//! Error types and handling for decoco
//!
//! Only data problems travel through this type. Contract misuse by the caller
//! (feeding new input while earlier input is still pending) panics instead, so
//! it can never be mistaken for a corrupt stream.

use crate::CodecKind;

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Low severity - the caller can move on to the next input
    Low,
    /// Medium severity - the operation should be retried or reconfigured
    Medium,
    /// High severity - the operation should be aborted
    High,
    /// Critical severity - the adapter can no longer be trusted
    Critical,
}

/// Main error type for decoco operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The decoder rejected its input
    #[error("{codec} decode error: {message}")]
    Decode {
        /// Codec whose decoder failed
        codec: CodecKind,
        /// Error message reported by the engine
        message: String,
    },

    /// Input ended before the stream's end marker
    #[error("{codec} stream is truncated")]
    Truncated {
        /// Codec whose stream was cut short
        codec: CodecKind,
    },

    /// The native engine failed to initialize or allocate
    #[error("{codec} engine error: {message}")]
    Engine {
        /// Codec whose engine failed
        codec: CodecKind,
        /// Error message reported by the engine
        message: String,
    },

    /// No codec signature matched the input
    #[error("Unrecognized compressed format")]
    UnrecognizedFormat,

    /// A codec name is not in the registry
    #[error("Unknown codec: {name}")]
    UnknownCodec {
        /// The name that was looked up
        name: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Corrupt or truncated compressed data
    Data,
    /// Native engine failures
    Engine,
    /// Registry and format detection misses
    Lookup,
    /// Configuration errors
    Config,
    /// I/O related errors
    Io,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } | Self::Truncated { .. } => ErrorKind::Data,
            Self::Engine { .. } => ErrorKind::Engine,
            Self::UnrecognizedFormat | Self::UnknownCodec { .. } => ErrorKind::Lookup,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Decode { .. } | Self::Truncated { .. } => ErrorSeverity::Low,
            Self::UnrecognizedFormat | Self::UnknownCodec { .. } => ErrorSeverity::Low,
            Self::Io { .. } => ErrorSeverity::Medium,
            Self::Config { .. } => ErrorSeverity::High,
            Self::Engine { .. } => ErrorSeverity::Critical,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Data errors are per input: the caller can handle them and carry on with
    /// a fresh adapter. Engine errors mean the engine could not be set up.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Decode { .. }
            | Self::Truncated { .. }
            | Self::UnrecognizedFormat
            | Self::UnknownCodec { .. }
            | Self::Io { .. } => true,
            Self::Engine { .. } | Self::Config { .. } => false,
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(codec: CodecKind, message: S) -> Self {
        Self::Decode {
            codec,
            message: message.into(),
        }
    }

    /// Create a new engine error
    pub fn engine<S: Into<String>>(codec: CodecKind, message: S) -> Self {
        Self::Engine {
            codec,
            message: message.into(),
        }
    }

    /// Create a new unknown codec error
    pub fn unknown_codec<S: Into<String>>(name: S) -> Self {
        Self::UnknownCodec { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Codec the error refers to, if any
    pub fn codec(&self) -> Option<CodecKind> {
        match self {
            Self::Decode { codec, .. } | Self::Truncated { codec } | Self::Engine { codec, .. } => {
                Some(*codec)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
