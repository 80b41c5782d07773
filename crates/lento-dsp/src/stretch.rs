//! Nearest-neighbor time-stretch.

use lento_core::SampleBuffer;

use crate::error::{Error, Result};

/// Stretch `input` so it plays back at `1.0 - slow_factor` of the original
/// speed, without pitch correction.
///
/// The output has `floor(len / (1.0 - slow_factor))` frames; output frame
/// `i` reads source frame `floor(i * (1.0 - slow_factor))`, falling back
/// to silence if that index is ever out of range.
///
/// This is deliberate nearest-neighbor resampling: the stepped, aliased
/// character of the result is part of the lo-fi aesthetic, not a defect.
///
/// `slow_factor` must be in `[0, 1)`; `0.0` is the identity stretch.
/// Values at or above `1.0` would divide the length by zero (or worse) and
/// are rejected, as are negative values.
pub fn stretch(input: &SampleBuffer, slow_factor: f32) -> Result<SampleBuffer> {
    if !slow_factor.is_finite() || !(0.0..1.0).contains(&slow_factor) {
        return Err(Error::InvalidSlowFactor(slow_factor));
    }

    let rate = 1.0 - slow_factor as f64;
    let input_len = input.len();
    let output_len = (input_len as f64 / rate).floor() as usize;

    let channels = input
        .channels()
        .map(|samples| {
            (0..output_len)
                .map(|i| {
                    let src = (i as f64 * rate).floor() as usize;
                    if src < input_len {
                        samples[src]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    // Channel count and sample rate carry over unchanged, so the only
    // invariant to re-establish is equal channel lengths, which the map
    // above guarantees.
    Ok(SampleBuffer::from_channels(channels, input.sample_rate())
        .expect("stretched channels share one length"))
}
