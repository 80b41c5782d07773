//! The external-collaborator seam: decoding and the playback graph.
//!
//! The pipeline itself never touches codecs or audio devices. It asks an
//! [`AudioContext`] to turn uploaded bytes into a [`SampleBuffer`] and,
//! on success, to wrap the processed buffer as a connected
//! [`PlaybackSource`]. Tests substitute a mock context; production code
//! uses [`SymphoniaContext`].

use lento_core::SampleBuffer;

use crate::decode::{self, DecodeError};

/// Platform collaborator providing decode and playback wiring.
pub trait AudioContext {
    /// Decode raw uploaded bytes into a sample buffer.
    fn decode(&self, data: &[u8]) -> Result<SampleBuffer, DecodeError>;

    /// Wrap a processed buffer as a source connected to the playback
    /// graph.
    fn connect(&self, buffer: SampleBuffer) -> PlaybackSource;
}

/// Default context: symphonia-backed decoding, pull-based playback source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaContext;

impl AudioContext for SymphoniaContext {
    fn decode(&self, data: &[u8]) -> Result<SampleBuffer, DecodeError> {
        decode::decode_bytes(data)
    }

    fn connect(&self, buffer: SampleBuffer) -> PlaybackSource {
        PlaybackSource::new(buffer)
    }
}

/// A ready-to-play audio source.
///
/// Iterates interleaved `f32` frames (frame-major, channel order within
/// each frame), which is the layout audio output backends consume.
#[derive(Debug, Clone)]
pub struct PlaybackSource {
    buffer: SampleBuffer,
    position: usize,
}

impl PlaybackSource {
    /// Wrap a processed buffer.
    pub fn new(buffer: SampleBuffer) -> Self {
        Self { buffer, position: 0 }
    }

    /// The processed buffer backing this source.
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.buffer.sample_rate()
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.buffer.num_channels()
    }

    /// Playback duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.buffer.duration_seconds()
    }

    /// Recover the buffer, e.g. to hand it to the export path.
    pub fn into_buffer(self) -> SampleBuffer {
        self.buffer
    }
}

impl Iterator for PlaybackSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let channels = self.buffer.num_channels();
        let frame = self.position / channels;
        if frame >= self.buffer.len() {
            return None;
        }
        let sample = self.buffer.channel(self.position % channels)[frame];
        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() * self.buffer.num_channels() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PlaybackSource {}
