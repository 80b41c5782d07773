//! Planar floating-point audio buffer.

use thiserror::Error;

/// Buffer construction error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Channels of unequal length were supplied.
    #[error("channel {index} has {actual} frames, expected {expected}")]
    ChannelLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A buffer needs at least one channel.
    #[error("buffer must have at least one channel")]
    NoChannels,

    /// Sample rate must be positive.
    #[error("sample rate must be positive")]
    ZeroSampleRate,
}

/// Planar audio buffer: one `Vec<f32>` per channel, all of equal length.
///
/// Samples are nominally in `[-1.0, 1.0]` but are not clamped; mixing and
/// echo accumulation may push values outside that range. Clamping happens
/// once, at the encoder boundary.
///
/// The channel layout and sample rate are fixed at construction. Stages
/// that change either allocate a new buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a zero-filled buffer of `num_channels` x `len` frames.
    pub fn new(num_channels: usize, len: usize, sample_rate: u32) -> Result<Self, BufferError> {
        if num_channels == 0 {
            return Err(BufferError::NoChannels);
        }
        if sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }
        Ok(Self {
            channels: vec![vec![0.0; len]; num_channels],
            sample_rate,
        })
    }

    /// Create a buffer from existing channel data.
    ///
    /// All channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, BufferError> {
        if channels.is_empty() {
            return Err(BufferError::NoChannels);
        }
        if sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }
        let expected = channels[0].len();
        for (index, channel) in channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(BufferError::ChannelLengthMismatch {
                    index,
                    expected,
                    actual: channel.len(),
                });
            }
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Whether the buffer holds zero frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of channels (1 = mono, 2 = stereo).
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Samples of channel `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_channels()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mutable samples of channel `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_channels()`.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Iterator over channels as slices.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the buffer, returning the channel data.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let buffer = SampleBuffer::new(2, 4, 44100).unwrap();
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
        assert!(buffer.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_new_rejects_zero_channels() {
        assert_eq!(
            SampleBuffer::new(0, 4, 44100).unwrap_err(),
            BufferError::NoChannels
        );
    }

    #[test]
    fn test_new_rejects_zero_sample_rate() {
        assert_eq!(
            SampleBuffer::new(1, 4, 0).unwrap_err(),
            BufferError::ZeroSampleRate
        );
    }

    #[test]
    fn test_from_channels() {
        let buffer =
            SampleBuffer::from_channels(vec![vec![0.5, -0.5], vec![0.1, -0.1]], 48000).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.channel(0), &[0.5, -0.5]);
        assert_eq!(buffer.channel(1), &[0.1, -0.1]);
    }

    #[test]
    fn test_from_channels_rejects_mismatched_lengths() {
        let err =
            SampleBuffer::from_channels(vec![vec![0.0; 3], vec![0.0; 2]], 44100).unwrap_err();
        assert_eq!(
            err,
            BufferError::ChannelLengthMismatch {
                index: 1,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_empty_buffer_allowed() {
        let buffer = SampleBuffer::new(1, 0, 44100).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_duration_seconds() {
        let buffer = SampleBuffer::new(1, 22050, 44100).unwrap();
        assert!((buffer.duration_seconds() - 0.5).abs() < 1e-9);
    }
}
