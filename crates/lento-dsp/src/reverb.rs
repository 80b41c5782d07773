//! Synthetic reverb tail generation.

use lento_core::SampleBuffer;
use rand::Rng;

use crate::error::{Error, Result};

/// Generate a stereo decaying-noise buffer standing in for a room impulse
/// response.
///
/// The buffer holds `floor(sample_rate * room_size)` frames of uniform
/// white noise shaped by an `exp(-i / (sample_rate * damping))` envelope.
/// Channels are generated independently, so there is no stereo
/// correlation, and the output differs on every call.
///
/// `room_size` is the tail duration in seconds; `damping` sets the decay
/// time constant. Both must be positive and finite.
pub fn reverb_tail(sample_rate: u32, room_size: f32, damping: f32) -> Result<SampleBuffer> {
    if !room_size.is_finite() || room_size <= 0.0 {
        return Err(Error::InvalidReverbParameter {
            name: "room_size",
            value: room_size,
        });
    }
    if !damping.is_finite() || damping <= 0.0 {
        return Err(Error::InvalidReverbParameter {
            name: "damping",
            value: damping,
        });
    }

    let len = (sample_rate as f64 * room_size as f64).floor() as usize;
    let tau = sample_rate as f32 * damping;
    let mut rng = rand::thread_rng();

    let channels = (0..2)
        .map(|_| {
            (0..len)
                .map(|i| rng.gen_range(-1.0f32..1.0) * (-(i as f32) / tau).exp())
                .collect()
        })
        .collect();

    Ok(SampleBuffer::from_channels(channels, sample_rate)
        .expect("generated channels share one length"))
}
