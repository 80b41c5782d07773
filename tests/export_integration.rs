//! Export-path integration tests: process then serialize.
//!
//! Unlike the preview path, every failure here must surface as an error.

use lento::prelude::*;

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[test]
fn test_processed_buffer_encodes_to_canonical_wav() {
    let input = SampleBuffer::new(2, 4410, 44100).unwrap();
    let processed = process_buffer(&input, &ProcessingOptions::default()).unwrap();

    let bytes = encode_wav_memory(&processed).unwrap();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(read_u16(&bytes, 22), 2);
    assert_eq!(read_u32(&bytes, 24), 44100);
    assert_eq!(read_u16(&bytes, 34), 16);
    assert_eq!(
        read_u32(&bytes, 40) as usize,
        processed.len() * processed.num_channels() * 2
    );
    assert_eq!(bytes.len(), 44 + processed.len() * processed.num_channels() * 2);
}

#[test]
fn test_hot_mix_is_clamped_at_the_encoder() {
    // Drive the mix far past full scale; the encoder must saturate
    // instead of wrapping.
    let loud = SampleBuffer::from_channels(vec![vec![1.0; 64]], 44100).unwrap();
    let wet = SampleBuffer::from_channels(vec![vec![1.0; 64]], 44100).unwrap();
    let mixed = lento::dsp::mix(&loud, &wet, 1.0, 1.0);
    assert!(mixed.channel(0).iter().all(|&s| s == 2.0));

    let bytes = encode_wav_memory(&mixed).unwrap();
    let first = i16::from_le_bytes([bytes[44], bytes[45]]);
    assert_eq!(first, 32767);
}

#[test]
fn test_export_wav_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processed.wav");

    let input = SampleBuffer::new(1, 2205, 22050).unwrap();
    let processed = process_buffer(&input, &ProcessingOptions::default()).unwrap();
    export_to_file(&path, &processed).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len() as usize, processed.len());
}

#[test]
fn test_export_unknown_extension_is_a_hard_error() {
    let buffer = SampleBuffer::new(1, 16, 44100).unwrap();
    assert!(export_to_file("processed.flac", &buffer).is_err());
}

#[cfg(feature = "mp3")]
#[test]
fn test_export_mp3_file() {
    // The transcoder is an external collaborator; skip when absent.
    if lento::export::FfmpegEngine::load().is_err() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("processed.mp3");

    let tone: Vec<f32> = (0..8820)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin() * 0.5)
        .collect();
    let input = SampleBuffer::from_channels(vec![tone], 44100).unwrap();
    let processed = process_buffer(&input, &ProcessingOptions::default()).unwrap();

    export_to_file(&path, &processed).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_ne!(&bytes[..4], b"RIFF");
}
