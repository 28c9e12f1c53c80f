//! Configuration types for decoco
//!
//! This module provides the typed, validated values every adapter is
//! constructed from.

/// Compression level preset
///
/// Each codec maps the preset onto its own native numeric scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Fastest setting the codec offers
    Fast,
    /// The codec's middle ground
    #[default]
    Balanced,
    /// Smallest output the codec can produce
    Small,
}

impl Level {
    /// Parse a preset name (`fast`, `balanced`, `small`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fast" => Some(Self::Fast),
            "balanced" => Some(Self::Balanced),
            "small" => Some(Self::Small),
            _ => None,
        }
    }
}

/// Output window size used by the growth loop, with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct ChunkSize(usize);

impl ChunkSize {
    /// Minimum chunk size (a single byte still makes progress)
    pub const MIN: usize = 1;
    /// Maximum chunk size (64MB)
    pub const MAX: usize = 64 * 1024 * 1024;
    /// Default chunk size (16KB)
    pub const DEFAULT: usize = 16 * 1024;

    /// Create a new chunk size with validation
    pub fn new(size: usize) -> Result<Self, String> {
        if size < Self::MIN {
            Err(format!("Chunk size {} is below minimum {}", size, Self::MIN))
        } else if size > Self::MAX {
            Err(format!("Chunk size {} exceeds maximum {}", size, Self::MAX))
        } else {
            Ok(Self(size))
        }
    }

    /// Get the chunk size value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<ChunkSize> for usize {
    fn from(size: ChunkSize) -> Self {
        size.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(16 * 1024)]
    #[case(ChunkSize::MAX)]
    fn test_chunk_size_accepts(#[case] size: usize) {
        assert_eq!(ChunkSize::new(size).unwrap().get(), size);
    }

    #[rstest]
    #[case(0)]
    #[case(ChunkSize::MAX + 1)]
    fn test_chunk_size_rejects(#[case] size: usize) {
        assert!(ChunkSize::new(size).is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ChunkSize::default().get(), 16384);
        assert_eq!(Level::default(), Level::Balanced);
    }

    #[test]
    fn test_level_from_name() {
        assert_eq!(Level::from_name("fast"), Some(Level::Fast));
        assert_eq!(Level::from_name("balanced"), Some(Level::Balanced));
        assert_eq!(Level::from_name("small"), Some(Level::Small));
        assert_eq!(Level::from_name("Fast"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&Level::Small).unwrap(), "\"small\"");
        let size: ChunkSize = serde_json::from_str("4096").unwrap();
        assert_eq!(size.get(), 4096);
        assert!(serde_json::from_str::<ChunkSize>("0").is_err());
    }

    proptest! {
        #[test]
        fn test_chunk_size_validation_boundaries(size in 0usize..=2 * ChunkSize::MAX) {
            let valid = (ChunkSize::MIN..=ChunkSize::MAX).contains(&size);
            prop_assert_eq!(ChunkSize::new(size).is_ok(), valid);
        }
    }
}
