//! Integration tests for decoco
//!
//! These tests drive the public surface of every crate together: configuration
//! feeding the registry, the bounded contract through trait objects, sniffing
//! and the one-shot helpers.

use std::fs;

use decoco_compression::{
    bunzip2, bzip2, compress_named, decompress_auto, decompress_named, entries, find_compressor,
    find_decompressor, gunzip, gzip, sniff_codec, xunzip, xzip, BoundedCompress,
    BoundedDecompress, ChunkSize, CodecKind, Compressor, Decompressor, Error, ErrorKind, Level,
};
use decoco_config::{ConfigBuilder, ConfigLoader};
use decoco_tests::{generate_test_data, init_tracing, TestDataPattern};
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

const HELLO: &[u8] = b"hello\n";

const HELLO_GZ: [u8; 26] = [
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xcb, 0x48, 0xcd, 0xc9, 0xc9,
    0xe7, 0x02, 0x00, 0x20, 0x30, 0x3a, 0x36, 0x06, 0x00, 0x00, 0x00,
];

const HELLO_BZ2: [u8; 42] = [
    0x42, 0x5a, 0x68, 0x36, 0x31, 0x41, 0x59, 0x26, 0x53, 0x59, 0xc1, 0xc0, 0x80, 0xe2, 0x00,
    0x00, 0x01, 0x41, 0x00, 0x00, 0x10, 0x02, 0x44, 0xa0, 0x00, 0x30, 0xcd, 0x00, 0xc3, 0x46,
    0x29, 0x97, 0x17, 0x72, 0x45, 0x38, 0x50, 0x90, 0xc1, 0xc0, 0x80, 0xe2,
];

const HELLO_BR: [u8; 10] = [0x8b, 0x02, 0x80, 0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x0a, 0x03];

const HELLO_ZST: [u8; 19] = [
    0x28, 0xb5, 0x2f, 0xfd, 0x04, 0x58, 0x31, 0x00, 0x00, 0x68, 0x65, 0x6c, 0x6c, 0x6f, 0x0a,
    0x53, 0x88, 0xbd, 0x91,
];

/// Feed `data` in `piece`-sized spans through `window`-sized bounded calls
fn stream_compress(
    compressor: &mut dyn BoundedCompress,
    data: &[u8],
    piece: usize,
    window: usize,
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; window];

    for span in data.chunks(piece) {
        let mut input = span;
        loop {
            let written = compressor.compress_into(input, &mut buf).unwrap();
            input = &[];
            out.extend_from_slice(&buf[..written]);
            if written < window {
                break;
            }
        }
    }

    loop {
        let written = compressor.finish_into(&mut buf).unwrap();
        out.extend_from_slice(&buf[..written]);
        if written < window {
            break;
        }
    }
    out
}

fn stream_decompress(
    decompressor: &mut dyn BoundedDecompress,
    data: &[u8],
    piece: usize,
    window: usize,
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; window];

    for span in data.chunks(piece) {
        let mut input = span;
        loop {
            let written = decompressor.decompress_into(input, &mut buf).unwrap();
            input = &[];
            out.extend_from_slice(&buf[..written]);
            if written < window {
                break;
            }
        }
    }
    out
}

#[rstest]
fn test_bounded_streaming_through_trait_objects(
    #[values(
        CodecKind::Deflate,
        CodecKind::Zlib,
        CodecKind::Gzip,
        CodecKind::Bzip2,
        CodecKind::Lzma,
        CodecKind::Brotli,
        CodecKind::Zstd
    )]
    codec: CodecKind,
) {
    init_tracing();
    let data = generate_test_data(20_000, TestDataPattern::Mixed);

    let mut compressor: Box<dyn BoundedCompress> =
        Box::new(Compressor::with_defaults(codec).unwrap());
    let packed = stream_compress(compressor.as_mut(), &data, 1000, 61);
    assert_eq!(compressor.stats().bytes_in, data.len() as u64);
    assert_eq!(compressor.stats().bytes_out, packed.len() as u64);

    let mut decompressor: Box<dyn BoundedDecompress> =
        Box::new(Decompressor::with_defaults(codec).unwrap());
    let unpacked = stream_decompress(decompressor.as_mut(), &packed, 1000, 61);
    assert!(decompressor.is_finished());
    assert_eq!(unpacked, data);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Span and window sizes change how the bounded calls line up, never the bytes
    #[test]
    fn test_bounded_streaming_any_span_and_window(
        codec in prop::sample::select(CodecKind::ALL.to_vec()),
        data in prop::collection::vec(any::<u8>(), 0..=4096),
        piece in 1usize..=700,
        window in 1usize..=300
    ) {
        let mut compressor = Compressor::with_defaults(codec).unwrap();
        let packed = stream_compress(&mut compressor, &data, piece, window);

        let mut decompressor = Decompressor::with_defaults(codec).unwrap();
        let unpacked = stream_decompress(&mut decompressor, &packed, piece, window);
        prop_assert!(decompressor.is_finished());
        prop_assert_eq!(unpacked, data);
    }
}

#[rstest]
fn test_named_round_trip_across_patterns(
    #[values("deflate", "zlib", "gzip", "bzip2", "lzma", "brotli", "zstd")] name: &str,
    #[values(
        TestDataPattern::Zeros,
        TestDataPattern::Text,
        TestDataPattern::Random,
        TestDataPattern::Mixed
    )]
    pattern: TestDataPattern,
) {
    let data = generate_test_data(50_000, pattern);
    let packed = compress_named(name, &data).unwrap();
    assert_eq!(decompress_named(name, &packed).unwrap(), data);
}

#[test]
fn test_incompressible_data_grows_only_slightly() {
    let data = generate_test_data(64 * 1024, TestDataPattern::Random);
    for entry in entries() {
        let packed = compress_named(entry.name, &data).unwrap();
        assert!(
            packed.len() < data.len() + 1024,
            "{} expanded random data to {} bytes",
            entry.name,
            packed.len()
        );
    }
}

#[test]
fn test_zeros_compress_well() {
    let data = generate_test_data(256 * 1024, TestDataPattern::Zeros);
    for entry in entries() {
        let packed = compress_named(entry.name, &data).unwrap();
        assert!(packed.len() < data.len() / 50, "{} ratio too low", entry.name);
    }
}

#[test]
fn test_fixed_vectors_decode() {
    assert_eq!(gunzip(&HELLO_GZ).unwrap(), HELLO);
    assert_eq!(bunzip2(&HELLO_BZ2).unwrap(), HELLO);
    assert_eq!(decompress_named("brotli", &HELLO_BR).unwrap(), HELLO);
    assert_eq!(decompress_named("zstd", &HELLO_ZST).unwrap(), HELLO);
}

#[test]
fn test_fixed_vectors_encode() {
    assert_eq!(gzip(HELLO).unwrap(), HELLO_GZ);
    assert_eq!(bzip2(HELLO).unwrap(), HELLO_BZ2);
}

#[test]
fn test_one_shot_helpers_round_trip() {
    let data = generate_test_data(100_000, TestDataPattern::Text);
    assert_eq!(gunzip(&gzip(&data).unwrap()).unwrap(), data);
    assert_eq!(bunzip2(&bzip2(&data).unwrap()).unwrap(), data);
    assert_eq!(xunzip(&xzip(&data).unwrap()).unwrap(), data);
}

#[rstest]
#[case(CodecKind::Zlib)]
#[case(CodecKind::Gzip)]
#[case(CodecKind::Bzip2)]
#[case(CodecKind::Lzma)]
#[case(CodecKind::Zstd)]
fn test_sniffed_decompression(#[case] codec: CodecKind) {
    let data = generate_test_data(10_000, TestDataPattern::Text);
    let packed = compress_named(codec.name(), &data).unwrap();

    assert_eq!(sniff_codec(&packed), Some(codec));
    assert_eq!(decompress_auto(&packed).unwrap(), data);
}

#[test]
fn test_sniffing_plain_text_fails() {
    let error = decompress_auto(b"plain text is not compressed").unwrap_err();
    assert!(matches!(error, Error::UnrecognizedFormat));
    assert_eq!(error.kind(), ErrorKind::Lookup);
}

#[test]
fn test_registry_lookup_respects_settings() {
    let chunk = ChunkSize::new(512).unwrap();
    let compressor = find_compressor("bzip2", Level::Small, chunk)
        .unwrap()
        .unwrap();
    assert_eq!(compressor.codec(), CodecKind::Bzip2);
    assert_eq!(compressor.level(), Level::Small);
    assert_eq!(compressor.chunk_size(), chunk);

    let decompressor = find_decompressor("zstd", chunk).unwrap().unwrap();
    assert_eq!(decompressor.output_chunk_size(), chunk);

    assert!(find_compressor("lz4", Level::Fast, chunk).unwrap().is_none());
}

#[test]
fn test_truncated_stream_is_reported() {
    let data = generate_test_data(30_000, TestDataPattern::Mixed);
    let packed = gzip(&data).unwrap();
    let error = gunzip(&packed[..packed.len() / 2]).unwrap_err();
    assert!(matches!(
        error,
        Error::Truncated {
            codec: CodecKind::Gzip
        }
    ));
    assert!(error.is_recoverable());
}

#[test]
fn test_concatenated_streams_decode_first_only() {
    let mut packed = zstd_packed(b"first");
    packed.extend(zstd_packed(b"second"));
    assert_eq!(decompress_named("zstd", &packed).unwrap(), b"first");
}

fn zstd_packed(data: &[u8]) -> Vec<u8> {
    compress_named("zstd", data).unwrap()
}

#[test]
fn test_config_file_drives_codec_selection() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("decoco.toml");
    fs::write(
        &config_path,
        r#"
[codec]
default_codec = "gzip"
level = "small"
chunk_size = 128
output_chunk_size = 64
"#,
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .add_defaults()
        .add_source_file(&config_path)
        .build()
        .unwrap();

    let mut compressor = config.codec.compressor().unwrap();
    assert_eq!(compressor.codec(), CodecKind::Gzip);
    assert_eq!(compressor.chunk_size().get(), 128);

    let data = generate_test_data(10_000, TestDataPattern::Text);
    let mut packed = compressor.compress(&data).unwrap();
    packed.extend(compressor.finish().unwrap());
    // XFL byte marks maximum compression.
    assert_eq!(packed[8], 2);

    let mut decompressor = config.codec.decompressor().unwrap();
    assert_eq!(decompressor.decompress(&packed).unwrap(), data);
    assert!(decompressor.is_finished());
}

#[test]
fn test_environment_selects_codec() {
    std::env::set_var("DECOCO_IT__CODEC__DEFAULT_CODEC", "lzma");
    std::env::set_var("DECOCO_IT__CODEC__LEVEL", "fast");
    let config = ConfigBuilder::new()
        .add_defaults()
        .add_env_prefix("DECOCO_IT")
        .build();
    std::env::remove_var("DECOCO_IT__CODEC__DEFAULT_CODEC");
    std::env::remove_var("DECOCO_IT__CODEC__LEVEL");

    let config = config.unwrap();
    let compressor = config.codec.compressor().unwrap();
    assert_eq!(compressor.codec(), CodecKind::Lzma);
    assert_eq!(compressor.level(), Level::Fast);
}

#[test]
fn test_saved_config_round_trips_through_loader() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.yaml");

    let mut config = ConfigBuilder::new().add_defaults().build().unwrap();
    config.codec.default_codec = "brotli".to_string();
    ConfigLoader::save_to_file(&config, &config_path).unwrap();

    let loaded = ConfigLoader::load_from_file(&config_path).unwrap();
    assert_eq!(loaded, config);

    let data = generate_test_data(4096, TestDataPattern::Text);
    let mut compressor = loaded.codec.compressor().unwrap();
    let mut packed = compressor.compress(&data).unwrap();
    packed.extend(compressor.finish().unwrap());
    assert_eq!(decompress_named("brotli", &packed).unwrap(), data);
}

#[test]
fn test_config_errors_convert_to_crate_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.yaml");
    fs::write(&config_path, "codec:\n  default_codec: snappy\n").unwrap();

    let error: Error = ConfigLoader::load_from_file(&config_path)
        .unwrap_err()
        .into();
    assert_eq!(error.kind(), ErrorKind::Config);
    assert!(!error.is_recoverable());
}
